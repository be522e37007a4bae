use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::store::Document;

/// A submitted job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: Position,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub notes: String,
}

impl Application {
    /// Build a pending application from validated form input. Names and phone
    /// are trimmed; the email is trimmed and lowercased.
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        position: Position,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ids::tagged("APP"),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            position,
            status: ApplicationStatus::Pending,
            applied_at: now,
            last_updated: now,
            notes: String::new(),
        }
    }

    /// Safe subset returned to applicants checking their own status. Contact
    /// details stay server-side.
    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            id: self.id.clone(),
            position: self.position,
            status: self.status,
            applied_at: self.applied_at,
            last_updated: self.last_updated,
        }
    }
}

impl Document for Application {
    const COLLECTION: &'static str = "applications";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.applied_at
    }
}

/// Openings accepted by the careers form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    BackendEngineer,
    AiDeveloper,
    QuantitativeAnalyst,
    MobileAppDeveloper,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::BackendEngineer,
        Position::AiDeveloper,
        Position::QuantitativeAnalyst,
        Position::MobileAppDeveloper,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Position::BackendEngineer => "backend-engineer",
            Position::AiDeveloper => "ai-developer",
            Position::QuantitativeAnalyst => "quantitative-analyst",
            Position::MobileAppDeveloper => "mobile-app-developer",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|position| position.label() == value)
    }
}

/// Review pipeline state; any transition is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interviewing,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == value)
    }
}

/// Counters surfaced on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: u64,
    pub pending: u64,
    pub reviewing: u64,
    pub interviewing: u64,
    pub rejected: u64,
    pub hired: u64,
    pub by_position: BTreeMap<String, u64>,
}

/// Sanitized applicant-facing view of an application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusView {
    pub id: String,
    pub position: Position,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}
