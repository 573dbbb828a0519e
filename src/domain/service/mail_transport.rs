use async_trait::async_trait;

use crate::domain::entity::email_request::EmailRequest;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("mail error: {0}")]
    Other(String),
}

/// The external mail API. One call per queued request; the consumer owns
/// ordering and failure logging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<(), MailError>;
}
