use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::domain::entity::notification::Notification;
use crate::domain::entity::user::User;
use crate::domain::service::{ChannelError, NotificationChannel};

/// Real push delivery through the web-push relay. The relay resolves the
/// user's browser subscriptions; this channel only posts the payload and
/// surfaces whatever failure the relay reports.
pub struct WebPushChannel {
    endpoint: String,
    client: Client,
}

impl WebPushChannel {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl NotificationChannel for WebPushChannel {
    fn name(&self) -> &'static str {
        "push"
    }

    async fn notify(&self, notification: &Notification, user: &User) -> Result<(), ChannelError> {
        let payload = json!({
            "userId": user.id,
            "codeMessage": notification.code_message,
            "actionLabelCode": notification.action_label_code,
            "metadata": notification.metadata,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChannelError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ChannelError::Delivery(format!(
                "web push endpoint returned {status}: {body_text}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_endpoint() {
        let channel = WebPushChannel::new("https://push.econoflow.app/send".to_string());
        assert_eq!(channel.endpoint, "https://push.econoflow.app/send");
        assert_eq!(channel.name(), "push");
    }
}
