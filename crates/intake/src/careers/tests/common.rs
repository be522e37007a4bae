use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::careers::domain::{Application, Position};
use crate::careers::router::careers_router;
use crate::careers::service::ApplicationService;
use crate::notify::{Notice, Notifier, NotifyError};
use crate::store::{MemoryCollection, RecordStore, StoreError};

pub(super) fn application() -> Application {
    Application::new(
        " Maya ",
        "Okafor",
        " Maya.Okafor@Example.com ",
        " 515-555-0100 ",
        Position::BackendEngineer,
    )
}

#[derive(Default)]
pub(super) struct CapturingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CapturingNotifier {
    pub(super) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

impl Notifier for CapturingNotifier {
    fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl RecordStore<Application> for UnavailableStore {
    fn insert(
        &self,
        _record: Application,
    ) -> impl Future<Output = Result<Application, StoreError>> + Send + '_ {
        async { Err(StoreError::Unavailable("database offline".to_string())) }
    }

    fn all(&self) -> impl Future<Output = Result<Vec<Application>, StoreError>> + Send + '_ {
        async { Err(StoreError::Unavailable("database offline".to_string())) }
    }

    fn find<'a>(
        &'a self,
        _id: &'a str,
    ) -> impl Future<Output = Result<Option<Application>, StoreError>> + Send + 'a {
        async { Err(StoreError::Unavailable("database offline".to_string())) }
    }

    fn update(
        &self,
        _record: Application,
    ) -> impl Future<Output = Result<(), StoreError>> + Send + '_ {
        async { Err(StoreError::Unavailable("database offline".to_string())) }
    }

    fn count(&self) -> impl Future<Output = Result<u64, StoreError>> + Send + '_ {
        async { Err(StoreError::Unavailable("database offline".to_string())) }
    }
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryCollection<Application>, CapturingNotifier>,
    Arc<MemoryCollection<Application>>,
    Arc<CapturingNotifier>,
) {
    let store = Arc::new(MemoryCollection::new());
    let notifier = Arc::new(CapturingNotifier::default());
    let service = ApplicationService::new(store.clone(), notifier.clone());
    (service, store, notifier)
}

pub(super) fn build_router() -> (axum::Router, Arc<MemoryCollection<Application>>) {
    let store = Arc::new(MemoryCollection::new());
    let notifier = Arc::new(CapturingNotifier::default());
    let service = Arc::new(ApplicationService::new(store.clone(), notifier));
    (careers_router(service), store)
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
