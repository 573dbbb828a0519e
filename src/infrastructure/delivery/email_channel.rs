use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;
use crate::domain::service::{ChannelError, NotificationChannel};
use crate::infrastructure::email::template::{tokens_from_metadata, EmailTemplate};
use crate::infrastructure::email::EmailComposer;

/// Delivers a notification by rendering its email template and queuing
/// the result for the SMTP consumer.
pub struct EmailChannel {
    composer: Arc<EmailComposer>,
}

impl EmailChannel {
    pub fn new(composer: Arc<EmailComposer>) -> Self {
        Self { composer }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, notification: &Notification, user: &User) -> Result<(), ChannelError> {
        let Some(template) = EmailTemplate::parse(&notification.code_message) else {
            tracing::warn!(
                notification_id = %notification.id,
                code_message = %notification.code_message,
                "no email template matches the notification code"
            );
            return Err(ChannelError::TemplateNotFound);
        };

        let tokens = tokens_from_metadata(notification.metadata.as_deref());
        self.composer
            .compose_and_enqueue(template, user, &tokens)
            .map_err(|e| ChannelError::Rendering(e.to_string()))
    }
}
