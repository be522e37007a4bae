use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::store::Document;

/// A message submitted through the site contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub timestamp: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Build a record from validated form input. The name and message are
    /// trimmed; the email is trimmed and lowercased so waitlist-style lookups
    /// and replies always see one canonical spelling.
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            id: ids::tagged("CONTACT"),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            message: message.trim().to_string(),
            status: ContactStatus::New,
            timestamp: Utc::now(),
            read_at: None,
        }
    }
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Read-state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
}

impl ContactStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
        }
    }
}

/// Counters surfaced on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: u64,
    pub unread: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalises_fields() {
        let contact = Contact::new("  Ada Lovelace ", "  Ada@Example.COM ", "  needs a word  ");
        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(contact.message, "needs a word");
        assert_eq!(contact.status, ContactStatus::New);
        assert!(contact.read_at.is_none());
        assert!(contact.id.starts_with("CONTACT-"));
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let contact = Contact::new("Ada", "ada@example.com", "a valid message body");
        let value = serde_json::to_value(&contact).expect("serialize");
        assert_eq!(value["status"], "new");
        assert!(value.get("readAt").is_some());
        assert!(value.get("read_at").is_none());
    }
}
