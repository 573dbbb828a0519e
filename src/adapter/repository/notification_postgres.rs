use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::channel_set::ChannelSet;
use crate::domain::entity::notification::{
    Notification, NotificationCategory, NotificationType,
};
use crate::domain::entity::user::User;
use crate::domain::repository::NotificationRepository;

pub struct NotificationPostgresRepository {
    pool: Arc<PgPool>,
}

impl NotificationPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    code_message: String,
    notification_type: String,
    category: String,
    action_label_code: Option<String>,
    metadata: Option<String>,
    limit_channels: i16,
    is_read: bool,
    is_sent: bool,
    is_sticky: bool,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = anyhow::Error;

    fn try_from(r: NotificationRow) -> anyhow::Result<Notification> {
        let notification_type = NotificationType::parse(&r.notification_type)
            .ok_or_else(|| anyhow!("unknown notification type: {}", r.notification_type))?;
        let category = NotificationCategory::parse(&r.category)
            .ok_or_else(|| anyhow!("unknown notification category: {}", r.category))?;

        Ok(Notification {
            id: r.id,
            user_id: r.user_id,
            code_message: r.code_message,
            notification_type,
            category,
            action_label_code: r.action_label_code,
            metadata: r.metadata,
            limit_channels: ChannelSet::from_bits(r.limit_channels as u8),
            is_read: r.is_read,
            is_sent: r.is_sent,
            is_sticky: r.is_sticky,
            expires_at: r.expires_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    language_code: String,
    notification_channels: i16,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            language_code: r.language_code,
            channels: ChannelSet::from_bits(r.notification_channels as u8),
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl NotificationRepository for NotificationPostgresRepository {
    async fn find_with_user(&self, id: &Uuid) -> anyhow::Result<Option<(Notification, User)>> {
        let row: Option<NotificationRow> = sqlx::query_as(
            "SELECT id, user_id, code_message, notification_type, category, action_label_code, \
                    metadata, limit_channels, is_read, is_sent, is_sticky, expires_at, \
                    created_at, updated_at \
             FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, language_code, notification_channels, created_at \
             FROM users WHERE id = $1",
        )
        .bind(row.user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        Ok(Some((row.try_into()?, user.into())))
    }

    async fn find_unread_by_user(&self, user_id: &Uuid) -> anyhow::Result<Vec<Notification>> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            "SELECT id, user_id, code_message, notification_type, category, action_label_code, \
                    metadata, limit_channels, is_read, is_sent, is_sticky, expires_at, \
                    created_at, updated_at \
             FROM notifications \
             WHERE user_id = $1 AND is_read = FALSE \
               AND (expires_at IS NULL OR expires_at > NOW()) \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn create(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO notifications \
             (id, user_id, code_message, notification_type, category, action_label_code, \
              metadata, limit_channels, is_read, is_sent, is_sticky, expires_at, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(&notification.code_message)
        .bind(notification.notification_type.as_str())
        .bind(notification.category.as_str())
        .bind(&notification.action_label_code)
        .bind(&notification.metadata)
        .bind(i16::from(notification.limit_channels.bits()))
        .bind(notification.is_read)
        .bind(notification.is_sent)
        .bind(notification.is_sticky)
        .bind(notification.expires_at)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }

    async fn mark_read(&self, id: &Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
