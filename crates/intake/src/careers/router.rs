use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{Application, Position};
use super::service::ApplicationService;
use crate::notify::Notifier;
use crate::store::RecordStore;
use crate::validate::looks_like_email;

/// Router builder exposing the careers form and the applicant status lookup.
pub fn careers_router<S, N>(service: Arc<ApplicationService<S, N>>) -> Router
where
    S: RecordStore<Application> + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route(
            "/api/jobs/apply",
            get(lookup_handler::<S, N>).post(submit_handler::<S, N>),
        )
        .with_state(service)
}

/// Raw form payload; presence is checked by the handler so missing fields map
/// to a 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicationForm {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    position: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupQuery {
    id: Option<String>,
}

fn rejection(message: &str) -> Response {
    let payload = json!({
        "success": false,
        "message": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<ApplicationService<S, N>>>,
    Json(form): Json<ApplicationForm>,
) -> Response
where
    S: RecordStore<Application> + 'static,
    N: Notifier + 'static,
{
    let fields = [
        &form.first_name,
        &form.last_name,
        &form.email,
        &form.phone,
        &form.position,
    ];
    if fields
        .iter()
        .any(|field| field.as_deref().map_or(true, |value| value.trim().is_empty()))
    {
        return rejection("Missing required fields. Please fill in all required information.");
    }

    let email = form.email.as_deref().unwrap_or_default().trim();
    if !looks_like_email(email) {
        return rejection("Please enter a valid email address.");
    }

    let raw_position = form.position.as_deref().unwrap_or_default().trim();
    let Some(position) = Position::from_label(raw_position) else {
        return rejection("Invalid position selected");
    };

    let application = Application::new(
        form.first_name.as_deref().unwrap_or_default(),
        form.last_name.as_deref().unwrap_or_default(),
        email,
        form.phone.as_deref().unwrap_or_default(),
        position,
    );

    match service.create(application).await {
        Ok(stored) => {
            let payload = json!({
                "success": true,
                "message": "Application submitted successfully! We'll review your application and get back to you within 3-5 business days.",
                "applicationId": stored.id,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "job application failed");
            let payload = json!({
                "success": false,
                "message": "Something went wrong. Please try again later.",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn lookup_handler<S, N>(
    State(service): State<Arc<ApplicationService<S, N>>>,
    Query(query): Query<LookupQuery>,
) -> Response
where
    S: RecordStore<Application> + 'static,
    N: Notifier + 'static,
{
    let Some(id) = query.id.filter(|id| !id.trim().is_empty()) else {
        return rejection("Application ID is required");
    };

    match service.get(id.trim()).await {
        Ok(Some(application)) => {
            let payload = json!({
                "success": true,
                "application": application.status_view(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "success": false,
                "message": "Application not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "application lookup failed");
            let payload = json!({
                "success": false,
                "message": "Error retrieving application status",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
