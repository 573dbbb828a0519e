use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::notification::Notification;
use crate::domain::repository::NotificationRepository;

#[derive(Debug, Clone)]
pub struct ListUnreadNotificationsInput {
    pub user_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum ListUnreadNotificationsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// Unread, unexpired notifications for one user, newest first. Read and
/// expired rows are filtered in the query; nothing is deleted.
pub struct ListUnreadNotificationsUseCase {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl ListUnreadNotificationsUseCase {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    pub async fn execute(
        &self,
        input: &ListUnreadNotificationsInput,
    ) -> Result<Vec<Notification>, ListUnreadNotificationsError> {
        self.notification_repo
            .find_unread_by_user(&input.user_id)
            .await
            .map_err(|e| ListUnreadNotificationsError::Internal(e.to_string()))
    }
}
