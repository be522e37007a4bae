use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::WaitlistEntry;
use super::service::{Signup, WaitlistService};
use crate::notify::Notifier;
use crate::store::RecordStore;
use crate::validate::looks_like_email;

/// Router builder exposing waitlist signup and the public signup count.
pub fn waitlist_router<S, N>(service: Arc<WaitlistService<S, N>>) -> Router
where
    S: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/waitlist",
            get(count_handler::<S, N>).post(join_handler::<S, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct WaitlistForm {
    email: Option<String>,
    name: Option<String>,
}

fn rejection(message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn join_handler<S, N>(
    State(service): State<Arc<WaitlistService<S, N>>>,
    Json(form): Json<WaitlistForm>,
) -> Response
where
    S: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    let Some(email) = form.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return rejection("Email is required");
    };

    if !looks_like_email(email) {
        return rejection("Invalid email format");
    }

    match service
        .join(WaitlistEntry::new(email, form.name.as_deref()))
        .await
    {
        Ok(Signup::Created(_)) => {
            let payload = json!({
                "success": true,
                "message": "Thanks for joining our waitlist! We'll notify you when we launch.",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(Signup::AlreadyJoined) => {
            let payload = json!({
                "success": true,
                "duplicate": true,
                "message": "You're already on the waitlist. We'll be in touch soon.",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "waitlist signup failed");
            let payload = json!({
                "success": false,
                "message": "Something went wrong. Please try again later.",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn count_handler<S, N>(
    State(service): State<Arc<WaitlistService<S, N>>>,
) -> Response
where
    S: RecordStore<WaitlistEntry> + 'static,
    N: Notifier + 'static,
{
    let payload = json!({
        "success": true,
        "data": { "count": service.count().await },
    });
    (StatusCode::OK, Json(payload)).into_response()
}
