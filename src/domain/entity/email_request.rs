use serde::{Deserialize, Serialize};

/// A fully rendered outbound email, placed on the mail queue by the email
/// channel and consumed exactly once by the SMTP consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl EmailRequest {
    pub fn new(subject: String, body: String, from: String, to: Vec<String>) -> Self {
        Self {
            subject,
            body,
            from,
            to,
        }
    }
}
