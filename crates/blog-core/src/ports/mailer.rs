use async_trait::async_trait;

use crate::domain::MailMessage;

/// Mail dispatch - abstraction over delivery backends (log, relay, outbox).
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

/// Mail dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Failed to send mail: {0}")]
    Send(String),
}
