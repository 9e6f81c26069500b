use async_trait::async_trait;

use blog_core::domain::MailMessage;
use blog_core::ports::{MailError, Mailer};

/// Relay mailer - posts each message as JSON to a mail API endpoint.
pub struct HttpMailer {
    url: String,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "from": message.from,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| MailError::Send(e.to_string()))?;

        tracing::debug!(to = ?message.to, subject = %message.subject, "Mail relayed");
        Ok(())
    }
}
