use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Contact, ContactStats, ContactStatus};
use crate::notify::{Notice, Notifier, NotifyError};
use crate::store::{RecordStore, StoreError};

/// Service composing contact persistence and the notification hook.
pub struct ContactService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> ContactService<S, N>
where
    S: RecordStore<Contact> + 'static,
    N: Notifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Persist a submitted message and announce it.
    pub async fn create(&self, contact: Contact) -> Result<Contact, ContactServiceError> {
        let stored = self.store.insert(contact).await?;

        info!(id = %stored.id, email = %stored.email, "new contact message received");
        self.notifier.notify(
            Notice::new("contact_received", &stored.id)
                .detail("name", &stored.name)
                .detail("email", &stored.email),
        )?;

        Ok(stored)
    }

    /// All messages, newest first. Store failures degrade to an empty list so
    /// the dashboard keeps rendering.
    pub async fn all(&self) -> Vec<Contact> {
        match self.store.all().await {
            Ok(contacts) => contacts,
            Err(err) => {
                warn!(%err, "contact listing failed, returning empty");
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Contact>, ContactServiceError> {
        Ok(self.store.find(id).await?)
    }

    /// Flip a message to `read`, stamping `read_at`. Returns the updated
    /// record, or `None` when the id is unknown.
    pub async fn mark_read(&self, id: &str) -> Result<Option<Contact>, ContactServiceError> {
        let Some(mut contact) = self.store.find(id).await? else {
            return Ok(None);
        };

        contact.status = ContactStatus::Read;
        contact.read_at = Some(Utc::now());
        self.store.update(contact.clone()).await?;

        info!(id = %contact.id, "contact marked as read");
        Ok(Some(contact))
    }

    /// Total and unread counters for the dashboard.
    pub async fn stats(&self) -> ContactStats {
        let contacts = self.all().await;
        ContactStats {
            total: contacts.len() as u64,
            unread: contacts
                .iter()
                .filter(|contact| contact.status == ContactStatus::New)
                .count() as u64,
        }
    }
}

/// Error raised by the contact service.
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
