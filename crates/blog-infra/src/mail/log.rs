use async_trait::async_trait;

use blog_core::domain::MailMessage;
use blog_core::ports::{MailError, Mailer};

/// Console mailer - logs each message instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            body = %message.body,
            "Mail sent"
        );
        Ok(())
    }
}
