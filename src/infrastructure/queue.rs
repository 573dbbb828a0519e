use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::entity::email_request::EmailRequest;

/// Producer handle for the notification dispatch queue. Unbounded,
/// multi-producer, drained by a single consumer in arrival order.
///
/// Constructed once at startup and passed by reference to whoever creates
/// notifications; the receiver half goes to the consumer loop.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<Uuid>,
}

impl NotificationQueue {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Uuid>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn enqueue(&self, notification_id: Uuid) {
        if self.tx.send(notification_id).is_err() {
            tracing::warn!(%notification_id, "notification queue is closed, dropping id");
        }
    }
}

/// Producer handle for the outbound mail queue.
#[derive(Clone)]
pub struct EmailQueue {
    tx: mpsc::UnboundedSender<EmailRequest>,
}

impl EmailQueue {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EmailRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn enqueue(&self, request: EmailRequest) {
        if let Err(dropped) = self.tx.send(request) {
            tracing::warn!(
                subject = %dropped.0.subject,
                "email queue is closed, dropping request"
            );
        }
    }
}
