use async_trait::async_trait;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;
use crate::domain::service::{ChannelError, NotificationChannel};

/// Placeholder SMS delivery. Reports success so that an SMS-enabled user
/// never blocks the rest of the fan-out.
pub struct SmsChannel;

#[async_trait]
impl NotificationChannel for SmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    async fn notify(&self, notification: &Notification, _user: &User) -> Result<(), ChannelError> {
        tracing::info!(
            notification_id = %notification.id,
            "sms channel not implemented, skipping delivery"
        );
        Ok(())
    }
}
