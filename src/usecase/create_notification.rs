use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::channel_set::ChannelSet;
use crate::domain::entity::notification::{
    Notification, NotificationCategory, NotificationType,
};
use crate::domain::repository::NotificationRepository;
use crate::infrastructure::queue::NotificationQueue;

#[derive(Debug, Clone)]
pub struct CreateNotificationInput {
    pub user_id: Uuid,
    pub code_message: String,
    pub notification_type: NotificationType,
    pub category: NotificationCategory,
    pub action_label_code: Option<String>,
    pub metadata: Option<String>,
    pub limit_channels: ChannelSet,
    pub is_sticky: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateNotificationError {
    #[error("code message must not be empty")]
    EmptyCodeMessage,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Persists a notification created by a domain action and hands its id
/// to the dispatch queue. Delivery is fire-and-forget from the caller's
/// point of view.
pub struct CreateNotificationUseCase {
    notification_repo: Arc<dyn NotificationRepository>,
    queue: NotificationQueue,
}

impl CreateNotificationUseCase {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>, queue: NotificationQueue) -> Self {
        Self {
            notification_repo,
            queue,
        }
    }

    pub async fn execute(
        &self,
        input: CreateNotificationInput,
    ) -> Result<Notification, CreateNotificationError> {
        if input.code_message.trim().is_empty() {
            return Err(CreateNotificationError::EmptyCodeMessage);
        }

        let mut notification = Notification::new(
            input.user_id,
            input.code_message,
            input.notification_type,
            input.category,
        );
        notification.action_label_code = input.action_label_code;
        notification.metadata = input.metadata;
        notification.limit_channels = input.limit_channels;
        notification.is_sticky = input.is_sticky;
        notification.expires_at = input.expires_at;

        self.notification_repo
            .create(&notification)
            .await
            .map_err(|e| CreateNotificationError::Internal(e.to_string()))?;

        self.queue.enqueue(notification.id);

        Ok(notification)
    }
}
