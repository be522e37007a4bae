use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::AdminState;
use crate::careers::domain::{Application, ApplicationStatus};
use crate::contact::domain::Contact;
use crate::notify::Notifier;
use crate::store::RecordStore;
use crate::waitlist::domain::WaitlistEntry;

/// Router builder for the token-gated dashboard and the open debug endpoint.
pub fn admin_router<CS, AS, WS, N>(state: AdminState<CS, AS, WS, N>) -> Router
where
    CS: RecordStore<Contact> + 'static,
    AS: RecordStore<Application> + 'static,
    WS: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/admin/dashboard",
            get(dashboard_handler::<CS, AS, WS, N>).put(update_handler::<CS, AS, WS, N>),
        )
        .route("/api/debug", get(debug_handler::<CS, AS, WS, N>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBody {
    status: Option<String>,
    notes: Option<String>,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> Response {
    let payload = json!({
        "success": false,
        "message": "Unauthorized access. Admin authentication required.",
    });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn bad_request(message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn not_found(message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn internal_error() -> Response {
    let payload = json!({
        "success": false,
        "message": "Internal server error",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

pub(crate) async fn dashboard_handler<CS, AS, WS, N>(
    State(state): State<AdminState<CS, AS, WS, N>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    CS: RecordStore<Contact> + 'static,
    AS: RecordStore<Application> + 'static,
    WS: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    match bearer_token(&headers) {
        Some(token) if state.tokens.allows(token) => {}
        _ => return unauthorized(),
    }

    match query.kind.as_deref() {
        Some("stats") => {
            let applications = state.applications.stats().await;
            let waitlist_count = state.waitlist.count().await;
            let contacts = state.contacts.stats().await;

            let payload = json!({
                "success": true,
                "data": {
                    "applications": applications,
                    "waitlist": { "count": waitlist_count },
                    "contacts": contacts,
                },
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Some("applications") => {
            if let Some(id) = query.id.filter(|id| !id.trim().is_empty()) {
                match state.applications.get(id.trim()).await {
                    Ok(Some(application)) => {
                        let payload = json!({ "success": true, "data": application });
                        (StatusCode::OK, Json(payload)).into_response()
                    }
                    Ok(None) => not_found("Application not found"),
                    Err(err) => {
                        error!(%err, "application lookup failed");
                        internal_error()
                    }
                }
            } else {
                let payload = json!({
                    "success": true,
                    "data": state.applications.all().await,
                });
                (StatusCode::OK, Json(payload)).into_response()
            }
        }
        Some("contacts") => {
            let payload = json!({
                "success": true,
                "data": state.contacts.all().await,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Some("waitlist") => match state.waitlist.all().await {
            Ok(entries) => {
                let payload = json!({ "success": true, "data": entries });
                (StatusCode::OK, Json(payload)).into_response()
            }
            Err(err) => {
                error!(%err, "waitlist listing failed");
                internal_error()
            }
        },
        _ => bad_request("Invalid type parameter"),
    }
}

pub(crate) async fn update_handler<CS, AS, WS, N>(
    State(state): State<AdminState<CS, AS, WS, N>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
    Json(body): Json<UpdateBody>,
) -> Response
where
    CS: RecordStore<Contact> + 'static,
    AS: RecordStore<Application> + 'static,
    WS: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    match bearer_token(&headers) {
        Some(token) if state.tokens.allows(token) => {}
        _ => return unauthorized(),
    }

    match (query.kind.as_deref(), query.id) {
        (Some("application"), Some(id)) => {
            let Some(status) = body
                .status
                .as_deref()
                .and_then(ApplicationStatus::from_label)
            else {
                return bad_request("Invalid status");
            };

            match state
                .applications
                .update_status(id.trim(), status, body.notes)
                .await
            {
                Ok(Some(updated)) => {
                    let payload = json!({
                        "success": true,
                        "data": updated,
                        "message": "Application status updated successfully",
                    });
                    (StatusCode::OK, Json(payload)).into_response()
                }
                Ok(None) => not_found("Application not found"),
                Err(err) => {
                    error!(%err, "application status update failed");
                    internal_error()
                }
            }
        }
        (Some("contact"), Some(id)) => match state.contacts.mark_read(id.trim()).await {
            Ok(Some(updated)) => {
                let payload = json!({
                    "success": true,
                    "data": updated,
                    "message": "Contact marked as read",
                });
                (StatusCode::OK, Json(payload)).into_response()
            }
            Ok(None) => not_found("Contact not found"),
            Err(err) => {
                error!(%err, "contact update failed");
                internal_error()
            }
        },
        _ => bad_request("Invalid request parameters"),
    }
}

/// Open introspection endpoint: per-collection counts, no record payloads.
pub(crate) async fn debug_handler<CS, AS, WS, N>(
    State(state): State<AdminState<CS, AS, WS, N>>,
) -> Response
where
    CS: RecordStore<Contact> + 'static,
    AS: RecordStore<Application> + 'static,
    WS: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    let payload = json!({
        "success": true,
        "timestamp": Utc::now(),
        "data": {
            "applications": state.applications.all().await.len(),
            "contacts": state.contacts.all().await.len(),
            "waitlist": state.waitlist.count().await,
        },
    });
    (StatusCode::OK, Json(payload)).into_response()
}
