use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::usecase::cleanup_attachments::CleanupAttachmentsUseCase;

/// Runs the attachment cleanup sweep on a fixed interval until the
/// shared shutdown token fires. Sweep errors are logged; the next tick
/// runs regardless.
pub struct AttachmentCleanupEngine {
    use_case: Arc<CleanupAttachmentsUseCase>,
    interval: Duration,
    cancel_token: CancellationToken,
}

impl AttachmentCleanupEngine {
    pub fn new(
        use_case: Arc<CleanupAttachmentsUseCase>,
        interval: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            use_case,
            interval,
            cancel_token,
        }
    }

    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let use_case = self.use_case.clone();
        let token = self.cancel_token.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {
                        match use_case.execute().await {
                            Ok(report) if report.rows_deleted > 0 => {
                                tracing::info!(
                                    rows = report.rows_deleted,
                                    objects = report.objects_deleted,
                                    storage_errors = report.storage_errors,
                                    "attachment cleanup sweep completed"
                                );
                            }
                            Ok(_) => {
                                tracing::debug!("attachment cleanup sweep found nothing to delete");
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "attachment cleanup sweep failed");
                            }
                        }
                    }
                }
            }
        })
    }
}
