use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::attachment::Attachment;
use crate::domain::repository::AttachmentRepository;

pub struct AttachmentPostgresRepository {
    pool: Arc<PgPool>,
}

impl AttachmentPostgresRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttachmentRow {
    id: Uuid,
    file_name: String,
    storage_key: String,
    is_temporary: bool,
    expense_id: Option<Uuid>,
    expense_item_id: Option<Uuid>,
    income_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<AttachmentRow> for Attachment {
    fn from(r: AttachmentRow) -> Self {
        Attachment {
            id: r.id,
            file_name: r.file_name,
            storage_key: r.storage_key,
            is_temporary: r.is_temporary,
            expense_id: r.expense_id,
            expense_item_id: r.expense_item_id,
            income_id: r.income_id,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl AttachmentRepository for AttachmentPostgresRepository {
    async fn find_expired_temporary(
        &self,
        cutoff: DateTime<Utc>,
        limit: i64,
    ) -> anyhow::Result<Vec<Attachment>> {
        let rows: Vec<AttachmentRow> = sqlx::query_as(
            "SELECT id, file_name, storage_key, is_temporary, expense_id, \
                    expense_item_id, income_id, created_at \
             FROM attachments \
             WHERE is_temporary = TRUE \
               AND expense_id IS NULL \
               AND expense_item_id IS NULL \
               AND income_id IS NULL \
               AND created_at < $1 \
             ORDER BY created_at ASC \
             LIMIT $2",
        )
        .bind(cutoff)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_batch(&self, ids: &[Uuid]) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = ANY($1)")
            .bind(ids)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected())
    }
}
