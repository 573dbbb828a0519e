use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file attached to an expense, expense item or income.
///
/// Uploads land as temporary rows first and are linked when the owning
/// record is saved. A temporary attachment with no links is an orphan and
/// is eligible for the cleanup sweep once it outlives the expiration
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub is_temporary: bool,
    pub expense_id: Option<Uuid>,
    pub expense_item_id: Option<Uuid>,
    pub income_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(file_name: String, storage_key: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name,
            storage_key,
            is_temporary: true,
            expense_id: None,
            expense_item_id: None,
            income_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_orphan(&self) -> bool {
        self.is_temporary
            && self.expense_id.is_none()
            && self.expense_item_id.is_none()
            && self.income_id.is_none()
    }
}
