use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Application, ApplicationStats, ApplicationStatus};
use crate::notify::{Notice, Notifier, NotifyError};
use crate::store::{RecordStore, StoreError};

/// Service composing application persistence and the notification hook.
pub struct ApplicationService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> ApplicationService<S, N>
where
    S: RecordStore<Application> + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Persist a submitted application and announce it.
    pub async fn create(&self, application: Application) -> Result<Application, ApplicationServiceError> {
        let stored = self.store.insert(application).await?;

        info!(
            id = %stored.id,
            position = stored.position.label(),
            "new job application received"
        );
        self.notifier.notify(
            Notice::new("application_received", &stored.id)
                .detail("name", &format!("{} {}", stored.first_name, stored.last_name))
                .detail("email", &stored.email)
                .detail("position", stored.position.label()),
        )?;

        Ok(stored)
    }

    /// All applications, newest first. Store failures degrade to an empty
    /// list so the dashboard keeps rendering.
    pub async fn all(&self) -> Vec<Application> {
        match self.store.all().await {
            Ok(applications) => applications,
            Err(err) => {
                warn!(%err, "application listing failed, returning empty");
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Application>, ApplicationServiceError> {
        Ok(self.store.find(id).await?)
    }

    /// Apply a status change; any transition is allowed. Notes are only
    /// replaced when provided, `last_updated` always refreshes. Returns the
    /// updated record, or `None` when the id is unknown.
    pub async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
        notes: Option<String>,
    ) -> Result<Option<Application>, ApplicationServiceError> {
        let Some(mut application) = self.store.find(id).await? else {
            return Ok(None);
        };

        application.status = status;
        if let Some(notes) = notes {
            application.notes = notes;
        }
        application.last_updated = Utc::now();
        self.store.update(application.clone()).await?;

        info!(id = %application.id, status = status.label(), "application status updated");
        Ok(Some(application))
    }

    /// Counts by status and position; zeroed when the store is unreachable.
    pub async fn stats(&self) -> ApplicationStats {
        let applications = match self.store.all().await {
            Ok(applications) => applications,
            Err(err) => {
                warn!(%err, "application stats unavailable, returning zeroes");
                return ApplicationStats::default();
            }
        };

        let mut stats = ApplicationStats {
            total: applications.len() as u64,
            ..ApplicationStats::default()
        };

        for application in &applications {
            match application.status {
                ApplicationStatus::Pending => stats.pending += 1,
                ApplicationStatus::Reviewing => stats.reviewing += 1,
                ApplicationStatus::Interviewing => stats.interviewing += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
                ApplicationStatus::Hired => stats.hired += 1,
            }
            *stats
                .by_position
                .entry(application.position.label().to_string())
                .or_insert(0) += 1;
        }

        stats
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
