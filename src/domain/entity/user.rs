use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel_set::ChannelSet;

/// The notification-relevant slice of an EconoFlow user: where to reach
/// them, in which language, and over which channels they opted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// BCP 47 culture tag, e.g. `en-US` or `pt-BR`.
    pub language_code: String,
    pub channels: ChannelSet,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, language_code: String, channels: ChannelSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            language_code,
            channels,
            created_at: Utc::now(),
        }
    }

    /// Two-letter lowercase culture prefix used to pick a template
    /// directory.
    pub fn two_letter_culture(&self) -> String {
        self.language_code.chars().take(2).collect::<String>().to_lowercase()
    }
}
