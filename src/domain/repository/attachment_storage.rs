use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStorage: Send + Sync {
    /// Removes one stored object. Deleting a key that is already gone is
    /// not an error; the cleanup sweep must stay re-entrant.
    async fn delete_object(&self, storage_key: &str) -> anyhow::Result<()>;
}
