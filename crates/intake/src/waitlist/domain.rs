use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::store::Document;

/// A waitlist signup. Entries are immutable once stored and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Build an entry from validated form input; the email is trimmed and
    /// lowercased so the uniqueness check sees one canonical spelling.
    pub fn new(email: &str, name: Option<&str>) -> Self {
        Self {
            id: ids::tagged("WAITLIST"),
            email: email.trim().to_lowercase(),
            name: name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            joined_at: Utc::now(),
        }
    }
}

impl Document for WaitlistEntry {
    const COLLECTION: &'static str = "waitlist";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
