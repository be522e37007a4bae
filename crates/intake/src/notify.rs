//! Outbound notification seam.
//!
//! Submission services announce new records through [`Notifier`]. The default
//! implementation writes the announcement to the log; real delivery (email,
//! CRM sync) plugs in behind the same trait.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Trait describing outbound notification hooks.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice) -> Result<(), NotifyError>;
}

/// Notification payload: template name, the record it concerns, and a flat
/// detail map for the transport to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub template: String,
    pub record_id: String,
    pub details: BTreeMap<String, String>,
}

impl Notice {
    pub fn new(template: &str, record_id: &str) -> Self {
        Self {
            template: template.to_string(),
            record_id: record_id.to_string(),
            details: BTreeMap::new(),
        }
    }

    pub fn detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Log-backed notifier used by the running service.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        info!(
            template = %notice.template,
            record = %notice.record_id,
            details = ?notice.details,
            "notification queued"
        );
        Ok(())
    }
}
