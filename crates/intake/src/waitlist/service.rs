use std::sync::Arc;

use tracing::{info, warn};

use super::domain::WaitlistEntry;
use crate::notify::{Notice, Notifier, NotifyError};
use crate::store::{RecordStore, StoreError};

/// Outcome of a signup attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Signup {
    Created(WaitlistEntry),
    AlreadyJoined,
}

/// Service guarding waitlist uniqueness and persistence.
pub struct WaitlistService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> WaitlistService<S, N>
where
    S: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Insert unless the email is already present, compared
    /// case-insensitively. The duplicate path never writes.
    pub async fn join(&self, entry: WaitlistEntry) -> Result<Signup, WaitlistServiceError> {
        let existing = self.store.all().await?;
        if existing
            .iter()
            .any(|known| known.email.eq_ignore_ascii_case(&entry.email))
        {
            info!(email = %entry.email, "signup email already on waitlist");
            return Ok(Signup::AlreadyJoined);
        }

        let stored = self.store.insert(entry).await?;
        info!(id = %stored.id, "new waitlist signup");
        self.notifier
            .notify(Notice::new("waitlist_joined", &stored.id).detail("email", &stored.email))?;

        Ok(Signup::Created(stored))
    }

    /// All entries, newest first. Unlike the other listings this propagates
    /// store failures; the admin surface turns them into a 500.
    pub async fn all(&self) -> Result<Vec<WaitlistEntry>, WaitlistServiceError> {
        Ok(self.store.all().await?)
    }

    /// Signup count; 0 when the store is unreachable.
    pub async fn count(&self) -> u64 {
        match self.store.count().await {
            Ok(count) => count,
            Err(err) => {
                warn!(%err, "waitlist count unavailable, reporting zero");
                0
            }
        }
    }
}

/// Error raised by the waitlist service.
#[derive(Debug, thiserror::Error)]
pub enum WaitlistServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
