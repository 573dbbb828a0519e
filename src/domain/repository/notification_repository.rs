use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Loads a notification together with its addressee.
    async fn find_with_user(&self, id: &Uuid) -> anyhow::Result<Option<(Notification, User)>>;

    /// Unread, unexpired notifications for one user, newest first.
    async fn find_unread_by_user(&self, user_id: &Uuid) -> anyhow::Result<Vec<Notification>>;

    async fn create(&self, notification: &Notification) -> anyhow::Result<()>;

    /// Flags a notification as read. Returns false when the row does not
    /// exist.
    async fn mark_read(&self, id: &Uuid) -> anyhow::Result<bool>;
}
