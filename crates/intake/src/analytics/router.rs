use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// Router builder for the fire-and-forget analytics endpoint.
pub fn analytics_router() -> Router {
    Router::new().route("/api/analytics/track", post(track_handler))
}

/// Event envelope. Unknown keys are kept so the log line carries whatever
/// extra dimensions the client attached.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackEvent {
    event_type: Option<String>,
    page: Option<String>,
    session_id: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

pub(crate) async fn track_handler(Json(event): Json<TrackEvent>) -> Response {
    let required = [&event.event_type, &event.page, &event.session_id];
    if required
        .iter()
        .any(|field| field.as_deref().map_or(true, |value| value.trim().is_empty()))
    {
        let payload = json!({
            "success": false,
            "error": "Missing required analytics fields",
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    info!(
        event = event.event_type.as_deref().unwrap_or_default(),
        page = event.page.as_deref().unwrap_or_default(),
        session = event.session_id.as_deref().unwrap_or_default(),
        extra = ?event.extra,
        "analytics event"
    );

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
