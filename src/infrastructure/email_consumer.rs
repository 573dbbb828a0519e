use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::entity::email_request::EmailRequest;
use crate::domain::service::MailTransport;

/// Single consumer of the outbound mail queue: one transport call per
/// request, strictly in arrival order. A transport failure is logged and
/// the request dropped; there is no retry and no dead-letter.
pub struct EmailQueueConsumer {
    receiver: mpsc::UnboundedReceiver<EmailRequest>,
    transport: Arc<dyn MailTransport>,
    cancel_token: CancellationToken,
}

impl EmailQueueConsumer {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<EmailRequest>,
        transport: Arc<dyn MailTransport>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            receiver,
            transport,
            cancel_token,
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    tracing::debug!("email consumer stopping");
                    break;
                }
                received = self.receiver.recv() => {
                    let Some(request) = received else {
                        tracing::debug!("email queue closed, consumer stopping");
                        break;
                    };
                    match self.transport.send(&request).await {
                        Ok(()) => {
                            tracing::debug!(
                                subject = %request.subject,
                                recipients = request.to.len(),
                                "email sent"
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                subject = %request.subject,
                                error = %e,
                                "failed to send email, dropping request"
                            );
                        }
                    }
                }
            }
        }
    }
}
