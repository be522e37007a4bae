//! Mutex-guarded in-memory backend, used when the durable store cannot be
//! opened. Contents live for the process lifetime only.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{Document, RecordStore, StoreError};

/// One in-memory collection. Cloning shares the underlying records.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.records.lock().expect("store mutex poisoned")
    }
}

impl<T: Document> RecordStore<T> for MemoryCollection<T> {
    async fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut guard = self.lock();
        if guard.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<T>, StoreError> {
        let mut records: Vec<T> = self.lock().clone();
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    async fn find(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.lock().iter().find(|record| record.id() == id).cloned())
    }

    async fn update(&self, record: T) -> Result<(), StoreError> {
        let mut guard = self.lock();
        match guard.iter_mut().find(|existing| existing.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().len() as u64)
    }
}
