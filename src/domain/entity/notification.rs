use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel_set::ChannelSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Information,
    Warning,
    Error,
}

impl NotificationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationType::Information => "information",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "information" => Some(NotificationType::Information),
            "warning" => Some(NotificationType::Warning),
            "error" => Some(NotificationType::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationCategory {
    System,
    Account,
    Project,
}

impl NotificationCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationCategory::System => "system",
            NotificationCategory::Account => "account",
            NotificationCategory::Project => "project",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(NotificationCategory::System),
            "account" => Some(NotificationCategory::Account),
            "project" => Some(NotificationCategory::Project),
            _ => None,
        }
    }
}

/// A persisted notification addressed to one user.
///
/// `code_message` is the email template key; `metadata` is a flat
/// string-to-string JSON object whose keys become `{{key}}` template
/// placeholders. `limit_channels` restricts delivery to a subset of the
/// user's enabled channels; an empty set means no restriction.
///
/// Rows are never physically deleted. Queries filter on `is_read` and
/// expiry instead. `is_sent` is carried for the schema but is not written
/// by the dispatch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code_message: String,
    pub notification_type: NotificationType,
    pub category: NotificationCategory,
    pub action_label_code: Option<String>,
    pub metadata: Option<String>,
    pub limit_channels: ChannelSet,
    pub is_read: bool,
    pub is_sent: bool,
    pub is_sticky: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        code_message: String,
        notification_type: NotificationType,
        category: NotificationCategory,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            code_message,
            notification_type,
            category,
            action_label_code: None,
            metadata: None,
            limit_channels: ChannelSet::NONE,
            is_read: false,
            is_sent: false,
            is_sticky: false,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
        self.updated_at = Utc::now();
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_unread_and_unrestricted() {
        let n = Notification::new(
            Uuid::new_v4(),
            "WelcomeMessage".to_string(),
            NotificationType::Information,
            NotificationCategory::Account,
        );
        assert!(!n.is_read);
        assert!(!n.is_sent);
        assert!(n.limit_channels.is_empty());
        assert!(!n.is_expired(Utc::now()));
    }

    #[test]
    fn mark_read_sets_flag() {
        let mut n = Notification::new(
            Uuid::new_v4(),
            "Default".to_string(),
            NotificationType::Warning,
            NotificationCategory::System,
        );
        n.mark_read();
        assert!(n.is_read);
    }

    #[test]
    fn expiry() {
        let mut n = Notification::new(
            Uuid::new_v4(),
            "Default".to_string(),
            NotificationType::Information,
            NotificationCategory::System,
        );
        let now = Utc::now();
        n.expires_at = Some(now - chrono::Duration::minutes(1));
        assert!(n.is_expired(now));
    }

    #[test]
    fn type_and_category_round_trip() {
        assert_eq!(
            NotificationType::parse("warning"),
            Some(NotificationType::Warning)
        );
        assert_eq!(NotificationType::parse("unknown"), None);
        assert_eq!(
            NotificationCategory::parse(NotificationCategory::Project.as_str()),
            Some(NotificationCategory::Project)
        );
    }
}
