use std::sync::Arc;

use uuid::Uuid;

use crate::domain::repository::NotificationRepository;
use crate::domain::service::NotificationChannel;
use crate::infrastructure::delivery::ChannelFactory;

#[derive(Debug, Clone)]
pub struct DispatchNotificationInput {
    pub notification_id: Uuid,
}

/// How one dispatch ended. Partial delivery counts as `Delivered`; only
/// the logs distinguish it from a clean fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    /// The effective channel set was empty; skipping is deliberate and
    /// not a failure.
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchNotificationError {
    #[error("notification not found: {0}")]
    NotFound(Uuid),

    #[error("delivery failed in all channels: {0}")]
    AllChannelsFailed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// The notifier pipeline: resolve the notification and its addressee,
/// intersect the channel restriction with the user's enabled channels,
/// fan out, aggregate.
pub struct DispatchNotificationUseCase {
    notification_repo: Arc<dyn NotificationRepository>,
    factory: ChannelFactory,
}

impl DispatchNotificationUseCase {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>, factory: ChannelFactory) -> Self {
        Self {
            notification_repo,
            factory,
        }
    }

    pub async fn execute(
        &self,
        input: &DispatchNotificationInput,
    ) -> Result<DispatchOutcome, DispatchNotificationError> {
        let (notification, user) = self
            .notification_repo
            .find_with_user(&input.notification_id)
            .await
            .map_err(|e| DispatchNotificationError::Internal(e.to_string()))?
            .ok_or(DispatchNotificationError::NotFound(input.notification_id))?;

        let effective = if notification.limit_channels.is_empty() {
            user.channels
        } else {
            notification.limit_channels & user.channels
        };

        if effective.is_empty() {
            tracing::info!(
                notification_id = %notification.id,
                user_id = %user.id,
                "no delivery channel enabled for user, skipping"
            );
            return Ok(DispatchOutcome::Skipped);
        }

        let compound = self.factory.build(effective);
        tracing::debug!(
            notification_id = %notification.id,
            channels = ?compound.channel_names(),
            "dispatching notification"
        );

        compound
            .notify(&notification, &user)
            .await
            .map_err(|e| DispatchNotificationError::AllChannelsFailed(e.to_string()))?;

        Ok(DispatchOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::channel_set::ChannelSet;
    use crate::domain::entity::notification::{
        Notification, NotificationCategory, NotificationType,
    };
    use crate::domain::entity::user::User;
    use crate::domain::repository::notification_repository::MockNotificationRepository;
    use crate::domain::service::notification_channel::MockNotificationChannel;
    use crate::domain::service::ChannelError;

    fn fixture(user_channels: ChannelSet, limit: ChannelSet) -> (Notification, User) {
        let user = User::new(
            "ana@example.com".to_string(),
            "en-US".to_string(),
            user_channels,
        );
        let mut notification = Notification::new(
            user.id,
            "WelcomeMessage".to_string(),
            NotificationType::Information,
            NotificationCategory::Account,
        );
        notification.limit_channels = limit;
        (notification, user)
    }

    fn channel(name: &'static str, calls: usize, ok: bool) -> Arc<dyn NotificationChannel> {
        let mut mock = MockNotificationChannel::new();
        mock.expect_name().return_const(name);
        mock.expect_notify().times(calls).returning(move |_, _| {
            if ok {
                Ok(())
            } else {
                Err(ChannelError::Delivery("unreachable host".to_string()))
            }
        });
        Arc::new(mock)
    }

    fn repo_returning(
        pair: Option<(Notification, User)>,
    ) -> Arc<MockNotificationRepository> {
        let mut repo = MockNotificationRepository::new();
        repo.expect_find_with_user()
            .returning(move |_| Ok(pair.clone()));
        Arc::new(repo)
    }

    #[tokio::test]
    async fn delivers_on_user_enabled_channels() {
        let (notification, user) = fixture(ChannelSet::EMAIL, ChannelSet::NONE);
        let id = notification.id;
        let repo = repo_returning(Some((notification, user)));

        let factory = ChannelFactory::new(
            channel("email", 1, true),
            channel("sms", 0, true),
            channel("push", 0, true),
        );
        let uc = DispatchNotificationUseCase::new(repo, factory);

        let outcome = uc
            .execute(&DispatchNotificationInput {
                notification_id: id,
            })
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered);
    }

    #[tokio::test]
    async fn restriction_intersects_with_user_channels() {
        // user only has email enabled, notification restricted to push
        let (notification, user) = fixture(ChannelSet::EMAIL, ChannelSet::PUSH);
        let id = notification.id;
        let repo = repo_returning(Some((notification, user)));

        let factory = ChannelFactory::new(
            channel("email", 0, true),
            channel("sms", 0, true),
            channel("push", 0, true),
        );
        let uc = DispatchNotificationUseCase::new(repo, factory);

        let outcome = uc
            .execute(&DispatchNotificationInput {
                notification_id: id,
            })
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn partial_failure_still_delivers() {
        let (notification, user) = fixture(
            ChannelSet::EMAIL | ChannelSet::SMS,
            ChannelSet::NONE,
        );
        let id = notification.id;
        let repo = repo_returning(Some((notification, user)));

        let factory = ChannelFactory::new(
            channel("email", 1, false),
            channel("sms", 1, true),
            channel("push", 0, true),
        );
        let uc = DispatchNotificationUseCase::new(repo, factory);

        let outcome = uc
            .execute(&DispatchNotificationInput {
                notification_id: id,
            })
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Delivered);
    }

    #[tokio::test]
    async fn all_channels_failing_is_an_error() {
        let (notification, user) = fixture(ChannelSet::EMAIL, ChannelSet::NONE);
        let id = notification.id;
        let repo = repo_returning(Some((notification, user)));

        let factory = ChannelFactory::new(
            channel("email", 1, false),
            channel("sms", 0, true),
            channel("push", 0, true),
        );
        let uc = DispatchNotificationUseCase::new(repo, factory);

        let result = uc
            .execute(&DispatchNotificationInput {
                notification_id: id,
            })
            .await;
        match result.unwrap_err() {
            DispatchNotificationError::AllChannelsFailed(msg) => {
                assert!(msg.contains("unreachable host"));
            }
            e => unreachable!("unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn missing_notification_is_not_found() {
        let repo = repo_returning(None);
        let factory = ChannelFactory::new(
            channel("email", 0, true),
            channel("sms", 0, true),
            channel("push", 0, true),
        );
        let uc = DispatchNotificationUseCase::new(repo, factory);

        let missing = Uuid::new_v4();
        let result = uc
            .execute(&DispatchNotificationInput {
                notification_id: missing,
            })
            .await;
        match result.unwrap_err() {
            DispatchNotificationError::NotFound(id) => assert_eq!(id, missing),
            e => unreachable!("unexpected error: {:?}", e),
        }
    }
}
