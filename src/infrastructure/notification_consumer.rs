use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::usecase::dispatch_notification::{
    DispatchNotificationInput, DispatchNotificationUseCase, DispatchOutcome,
};

/// Single consumer of the notification dispatch queue. Items are
/// processed strictly in arrival order; a failed dispatch is logged and
/// the loop moves on. Cancellation exits without draining what remains.
pub struct NotificationQueueConsumer {
    receiver: mpsc::UnboundedReceiver<Uuid>,
    use_case: Arc<DispatchNotificationUseCase>,
    cancel_token: CancellationToken,
}

impl NotificationQueueConsumer {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<Uuid>,
        use_case: Arc<DispatchNotificationUseCase>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            receiver,
            use_case,
            cancel_token,
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    tracing::debug!("notification consumer stopping");
                    break;
                }
                received = self.receiver.recv() => {
                    let Some(notification_id) = received else {
                        tracing::debug!("notification queue closed, consumer stopping");
                        break;
                    };
                    let input = DispatchNotificationInput { notification_id };
                    match self.use_case.execute(&input).await {
                        Ok(DispatchOutcome::Delivered) => {
                            tracing::info!(%notification_id, "notification dispatched");
                        }
                        Ok(DispatchOutcome::Skipped) => {}
                        Err(e) => {
                            tracing::error!(
                                %notification_id,
                                error = %e,
                                "failed to dispatch notification"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::notification_repository::MockNotificationRepository;
    use crate::domain::service::notification_channel::MockNotificationChannel;
    use crate::domain::service::NotificationChannel;
    use crate::infrastructure::delivery::ChannelFactory;
    use crate::infrastructure::queue::NotificationQueue;

    fn idle_channel(name: &'static str) -> Arc<dyn NotificationChannel> {
        let mut mock = MockNotificationChannel::new();
        mock.expect_name().return_const(name);
        Arc::new(mock)
    }

    #[tokio::test]
    async fn drains_queue_and_stops_when_producers_are_gone() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_find_with_user().times(2).returning(|_| Ok(None));

        let factory = ChannelFactory::new(
            idle_channel("email"),
            idle_channel("sms"),
            idle_channel("push"),
        );
        let use_case = Arc::new(DispatchNotificationUseCase::new(Arc::new(repo), factory));

        let (queue, rx) = NotificationQueue::channel();
        queue.enqueue(Uuid::new_v4());
        queue.enqueue(Uuid::new_v4());
        drop(queue);

        let consumer =
            NotificationQueueConsumer::new(rx, use_case, CancellationToken::new());
        // runs to completion: both ids processed, then the closed queue
        // ends the loop
        consumer.run().await;
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop() {
        let repo = MockNotificationRepository::new();
        let factory = ChannelFactory::new(
            idle_channel("email"),
            idle_channel("sms"),
            idle_channel("push"),
        );
        let use_case = Arc::new(DispatchNotificationUseCase::new(Arc::new(repo), factory));

        let (_queue, rx) = NotificationQueue::channel();
        let token = CancellationToken::new();
        let consumer = NotificationQueueConsumer::new(rx, use_case, token.clone());

        let handle = tokio::spawn(consumer.run());
        token.cancel();
        handle.await.unwrap();
    }
}
