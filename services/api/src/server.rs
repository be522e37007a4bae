use crate::cli::ServeArgs;
use crate::infra::{AppState, StorageKind};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use intake::admin::AdminState;
use intake::careers::{Application, ApplicationService};
use intake::config::AppConfig;
use intake::contact::{Contact, ContactService};
use intake::error::AppError;
use intake::notify::LogNotifier;
use intake::store::{MemoryCollection, SqliteStore};
use intake::telemetry;
use intake::waitlist::{WaitlistEntry, WaitlistService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let notifier = Arc::new(LogNotifier);

    // One open attempt per process. A failure here pins the in-memory
    // fallback for the process lifetime; nothing retries per request.
    let (app, storage) =
        match SqliteStore::open(&config.store.path, config.store.busy_timeout_ms).await {
            Ok(store) => {
                let services = AdminState {
                    contacts: Arc::new(ContactService::new(
                        Arc::new(store.collection::<Contact>()),
                        notifier.clone(),
                    )),
                    applications: Arc::new(ApplicationService::new(
                        Arc::new(store.collection::<Application>()),
                        notifier.clone(),
                    )),
                    waitlist: Arc::new(WaitlistService::new(
                        Arc::new(store.collection::<WaitlistEntry>()),
                        notifier,
                    )),
                    tokens: config.admin.clone(),
                };
                (with_intake_routes(services), StorageKind::Sqlite)
            }
            Err(err) => {
                warn!(
                    %err,
                    path = %config.store.path.display(),
                    "durable store unavailable, using in-memory fallback"
                );
                let services = AdminState {
                    contacts: Arc::new(ContactService::new(
                        Arc::new(MemoryCollection::new()),
                        notifier.clone(),
                    )),
                    applications: Arc::new(ApplicationService::new(
                        Arc::new(MemoryCollection::new()),
                        notifier.clone(),
                    )),
                    waitlist: Arc::new(WaitlistService::new(
                        Arc::new(MemoryCollection::new()),
                        notifier,
                    )),
                    tokens: config.admin.clone(),
                };
                (with_intake_routes(services), StorageKind::Memory)
            }
        };

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        storage,
    };

    let app = app
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        storage = storage.label(),
        "marketing-site intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
