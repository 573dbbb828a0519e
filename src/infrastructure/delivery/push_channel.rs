use async_trait::async_trait;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;
use crate::domain::service::{ChannelError, NotificationChannel};

/// Placeholder push delivery, used when no web-push endpoint is
/// configured.
pub struct PushChannel;

#[async_trait]
impl NotificationChannel for PushChannel {
    fn name(&self) -> &'static str {
        "push"
    }

    async fn notify(&self, notification: &Notification, _user: &User) -> Result<(), ChannelError> {
        tracing::info!(
            notification_id = %notification.id,
            "push channel not implemented, skipping delivery"
        );
        Ok(())
    }
}
