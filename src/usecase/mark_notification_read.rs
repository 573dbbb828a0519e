use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::NotificationRepository;

#[derive(Debug, Clone)]
pub struct MarkNotificationReadInput {
    pub notification_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum MarkNotificationReadError {
    #[error("notification not found: {0}")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Flags a notification as read on user interaction. Rows stay in place;
/// unread queries simply stop returning them.
pub struct MarkNotificationReadUseCase {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadUseCase {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    pub async fn execute(
        &self,
        input: &MarkNotificationReadInput,
    ) -> Result<(), MarkNotificationReadError> {
        let updated = self
            .notification_repo
            .mark_read(&input.notification_id)
            .await
            .map_err(|e| MarkNotificationReadError::Internal(e.to_string()))?;

        if !updated {
            return Err(MarkNotificationReadError::NotFound(input.notification_id));
        }
        Ok(())
    }
}
