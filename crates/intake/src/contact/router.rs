use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::Contact;
use super::service::ContactService;
use crate::notify::Notifier;
use crate::store::RecordStore;
use crate::validate::looks_like_email;

const MIN_MESSAGE_CHARS: usize = 10;

/// Router builder exposing the public contact form endpoint.
pub fn contact_router<S, N>(service: Arc<ContactService<S, N>>) -> Router
where
    S: RecordStore<Contact> + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/contact", post(submit_handler::<S, N>))
        .with_state(service)
}

/// Raw form payload; presence is checked by the handler so missing fields map
/// to a 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

fn rejection(message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<ContactService<S, N>>>,
    Json(form): Json<ContactForm>,
) -> Response
where
    S: RecordStore<Contact> + 'static,
    N: Notifier + 'static,
{
    let (name, email, message) = match (&form.name, &form.email, &form.message) {
        (Some(name), Some(email), Some(message))
            if ![name, email, message]
                .iter()
                .any(|field| field.trim().is_empty()) =>
        {
            (name, email, message)
        }
        _ => return rejection("Please fill in all required fields."),
    };

    if !looks_like_email(email.trim()) {
        return rejection("Please enter a valid email address.");
    }

    if message.trim().chars().count() < MIN_MESSAGE_CHARS {
        return rejection("Please provide a more detailed message (minimum 10 characters).");
    }

    match service.create(Contact::new(name, email, message)).await {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": "Thank you for your message! We'll get back to you within 24 hours.",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "contact submission failed");
            let payload = json!({
                "success": false,
                "message": "Something went wrong. Please try again later.",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
