use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use intake::admin::{admin_router, AdminState};
use intake::analytics::analytics_router;
use intake::careers::{careers_router, Application};
use intake::contact::{contact_router, Contact};
use intake::notify::Notifier;
use intake::store::RecordStore;
use intake::waitlist::{waitlist_router, WaitlistEntry};
use serde_json::json;

/// Compose the entity routers with the api-level introspection routes.
pub(crate) fn with_intake_routes<CS, AS, WS, N>(services: AdminState<CS, AS, WS, N>) -> axum::Router
where
    CS: RecordStore<Contact> + 'static,
    AS: RecordStore<Application> + 'static,
    WS: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    contact_router(services.contacts.clone())
        .merge(careers_router(services.applications.clone()))
        .merge(waitlist_router(services.waitlist.clone()))
        .merge(analytics_router())
        .merge(admin_router(services))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found)
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "storage": state.storage.label(),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn not_found() -> impl IntoResponse {
    let payload = json!({
        "success": false,
        "error": "API endpoint not found",
    });
    (StatusCode::NOT_FOUND, Json(payload))
}
