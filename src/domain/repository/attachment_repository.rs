use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entity::attachment::Attachment;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Temporary attachments with no expense/expense-item/income link
    /// created before `cutoff`, oldest first, at most `limit` rows.
    async fn find_expired_temporary(
        &self,
        cutoff: DateTime<Utc>,
        limit: i64,
    ) -> anyhow::Result<Vec<Attachment>>;

    /// Deletes the given rows in one statement. Returns the number of
    /// rows actually removed.
    async fn delete_batch(&self, ids: &[Uuid]) -> anyhow::Result<u64>;
}
