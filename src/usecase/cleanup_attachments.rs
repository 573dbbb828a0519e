use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{AttachmentRepository, AttachmentStorage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub rows_deleted: u64,
    pub objects_deleted: usize,
    pub storage_errors: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CleanupAttachmentsError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// One cleanup sweep over expired temporary attachments.
///
/// Database rows go first, in one batch, then the storage objects one by
/// one. A crash in between leaves orphaned storage objects but no
/// orphaned rows; individual storage failures are logged and the sweep
/// keeps going.
pub struct CleanupAttachmentsUseCase {
    attachment_repo: Arc<dyn AttachmentRepository>,
    storage: Arc<dyn AttachmentStorage>,
    expiration: Duration,
    batch_size: i64,
}

impl CleanupAttachmentsUseCase {
    pub fn new(
        attachment_repo: Arc<dyn AttachmentRepository>,
        storage: Arc<dyn AttachmentStorage>,
        expiration: Duration,
        batch_size: i64,
    ) -> Self {
        Self {
            attachment_repo,
            storage,
            expiration,
            batch_size,
        }
    }

    pub async fn execute(&self) -> Result<CleanupReport, CleanupAttachmentsError> {
        let cutoff = Utc::now() - self.expiration;

        let expired = self
            .attachment_repo
            .find_expired_temporary(cutoff, self.batch_size)
            .await
            .map_err(|e| CleanupAttachmentsError::Internal(e.to_string()))?;

        if expired.is_empty() {
            return Ok(CleanupReport::default());
        }

        let ids: Vec<Uuid> = expired.iter().map(|a| a.id).collect();
        let rows_deleted = self
            .attachment_repo
            .delete_batch(&ids)
            .await
            .map_err(|e| CleanupAttachmentsError::Internal(e.to_string()))?;

        let mut objects_deleted = 0;
        let mut storage_errors = 0;
        for attachment in &expired {
            match self.storage.delete_object(&attachment.storage_key).await {
                Ok(()) => objects_deleted += 1,
                Err(e) => {
                    storage_errors += 1;
                    tracing::warn!(
                        attachment_id = %attachment.id,
                        storage_key = %attachment.storage_key,
                        error = %e,
                        "failed to delete attachment storage object"
                    );
                }
            }
        }

        Ok(CleanupReport {
            rows_deleted,
            objects_deleted,
            storage_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::attachment::Attachment;
    use crate::domain::repository::attachment_repository::MockAttachmentRepository;
    use crate::domain::repository::attachment_storage::MockAttachmentStorage;

    fn expired_attachment(name: &str) -> Attachment {
        Attachment::new(name.to_string(), format!("tmp/{name}"))
    }

    #[tokio::test]
    async fn deletes_rows_then_objects() {
        let batch = vec![expired_attachment("a.pdf"), expired_attachment("b.pdf")];
        let returned = batch.clone();

        let mut repo = MockAttachmentRepository::new();
        repo.expect_find_expired_temporary()
            .withf(|_, limit| *limit == 100)
            .returning(move |_, _| Ok(returned.clone()));
        repo.expect_delete_batch()
            .withf(move |ids| ids.len() == 2)
            .returning(|ids| Ok(ids.len() as u64));

        let mut storage = MockAttachmentStorage::new();
        storage.expect_delete_object().times(2).returning(|_| Ok(()));

        let uc = CleanupAttachmentsUseCase::new(
            Arc::new(repo),
            Arc::new(storage),
            Duration::hours(24),
            100,
        );
        let report = uc.execute().await.unwrap();
        assert_eq!(report.rows_deleted, 2);
        assert_eq!(report.objects_deleted, 2);
        assert_eq!(report.storage_errors, 0);
    }

    #[tokio::test]
    async fn empty_sweep_deletes_nothing() {
        let mut repo = MockAttachmentRepository::new();
        repo.expect_find_expired_temporary()
            .returning(|_, _| Ok(Vec::new()));
        // no delete_batch expectation: calling it would fail the test

        let storage = MockAttachmentStorage::new();

        let uc = CleanupAttachmentsUseCase::new(
            Arc::new(repo),
            Arc::new(storage),
            Duration::hours(24),
            100,
        );
        let report = uc.execute().await.unwrap();
        assert_eq!(report, CleanupReport::default());
    }

    #[tokio::test]
    async fn storage_failure_does_not_fail_the_sweep() {
        let batch = vec![expired_attachment("a.pdf"), expired_attachment("b.pdf")];
        let returned = batch.clone();

        let mut repo = MockAttachmentRepository::new();
        repo.expect_find_expired_temporary()
            .returning(move |_, _| Ok(returned.clone()));
        repo.expect_delete_batch().returning(|ids| Ok(ids.len() as u64));

        let mut storage = MockAttachmentStorage::new();
        let mut first = true;
        storage.expect_delete_object().times(2).returning(move |_| {
            if first {
                first = false;
                Err(anyhow::anyhow!("bucket unavailable"))
            } else {
                Ok(())
            }
        });

        let uc = CleanupAttachmentsUseCase::new(
            Arc::new(repo),
            Arc::new(storage),
            Duration::hours(24),
            100,
        );
        let report = uc.execute().await.unwrap();
        assert_eq!(report.rows_deleted, 2);
        assert_eq!(report.objects_deleted, 1);
        assert_eq!(report.storage_errors, 1);
    }

    #[tokio::test]
    async fn batch_size_is_passed_to_the_query() {
        let mut repo = MockAttachmentRepository::new();
        repo.expect_find_expired_temporary()
            .withf(|_, limit| *limit == 5)
            .returning(|_, _| Ok(Vec::new()));

        let storage = MockAttachmentStorage::new();
        let uc = CleanupAttachmentsUseCase::new(
            Arc::new(repo),
            Arc::new(storage),
            Duration::hours(1),
            5,
        );
        assert!(uc.execute().await.is_ok());
    }
}
