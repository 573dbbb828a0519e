use async_trait::async_trait;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Email template not found")]
    TemplateNotFound,

    #[error("template rendering failed: {0}")]
    Rendering(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// One delivery mechanism for a notification. Implementations must not
/// panic on expected failures; everything is reported through the error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, notification: &Notification, user: &User) -> Result<(), ChannelError>;
}
