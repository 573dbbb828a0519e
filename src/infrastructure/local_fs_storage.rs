use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use crate::domain::repository::AttachmentStorage;

/// Attachment storage on the local filesystem, keyed by path relative to
/// a configured root.
pub struct LocalFsStorage {
    root: PathBuf,
}

impl LocalFsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AttachmentStorage for LocalFsStorage {
    async fn delete_object(&self, storage_key: &str) -> anyhow::Result<()> {
        let path = self.root.join(storage_key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // already gone: the sweep may have been interrupted after a
            // previous partial pass
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(anyhow::Error::new(e)
                    .context(format!("failed to delete {}", path.display())))
            }
        }
    }
}
