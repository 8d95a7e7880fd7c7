//! Outbound verification mail

use async_trait::async_trait;
use tracing::info;

/// Mail delivery errors
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// Sends the verification link for a pending registration
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        link: &str,
    ) -> Result<(), MailError>;
}

/// Mailer that only logs the link (no SMTP delivery)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        link: &str,
    ) -> Result<(), MailError> {
        info!(email, username, link, "Verification mail queued");
        Ok(())
    }
}
