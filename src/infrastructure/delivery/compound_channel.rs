use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;
use crate::domain::service::{ChannelError, NotificationChannel};

/// Fans one notification out to an ordered list of channels concurrently
/// and aggregates the outcome: every channel delivered is a clean
/// success, at least one delivered is still a success with the failures
/// logged as warnings, and none delivered is a failure.
pub struct CompoundChannel {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl CompoundChannel {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }
}

#[async_trait]
impl NotificationChannel for CompoundChannel {
    fn name(&self) -> &'static str {
        "compound"
    }

    async fn notify(&self, notification: &Notification, user: &User) -> Result<(), ChannelError> {
        let mut attempts = tokio::task::JoinSet::new();
        for channel in &self.channels {
            let channel = Arc::clone(channel);
            let notification = notification.clone();
            let user = user.clone();
            attempts.spawn(async move {
                let result = channel.notify(&notification, &user).await;
                (channel.name(), result)
            });
        }

        let mut delivered: Vec<&'static str> = Vec::new();
        let mut failed: Vec<(&'static str, String)> = Vec::new();
        while let Some(joined) = attempts.join_next().await {
            match joined {
                Ok((name, Ok(()))) => delivered.push(name),
                Ok((name, Err(e))) => failed.push((name, e.to_string())),
                Err(e) => failed.push(("unknown", format!("channel task failed: {e}"))),
            }
        }

        for (name, error) in &failed {
            tracing::warn!(
                notification_id = %notification.id,
                channel = name,
                error = %error,
                "notification delivery failed in channel"
            );
        }

        if failed.is_empty() {
            tracing::info!(
                notification_id = %notification.id,
                "notification sent successfully in all channels"
            );
            return Ok(());
        }

        if delivered.is_empty() {
            let summary = failed
                .iter()
                .map(|(name, error)| format!("{name}: {error}"))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ChannelError::Delivery(summary));
        }

        tracing::info!(
            notification_id = %notification.id,
            channels = ?delivered,
            "notification sent successfully in some channels"
        );
        Ok(())
    }
}
