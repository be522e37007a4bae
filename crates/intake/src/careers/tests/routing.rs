use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::careers::router::careers_router;
use crate::careers::service::ApplicationService;
use crate::store::RecordStore as _;

fn form() -> Value {
    json!({
        "firstName": "Maya",
        "lastName": "Okafor",
        "email": "maya.okafor@example.com",
        "phone": "515-555-0100",
        "position": "backend-engineer"
    })
}

fn post_apply(body: &Value) -> Request<Body> {
    Request::post("/api/jobs/apply")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn submit_returns_application_id() {
    let (router, store) = build_router();

    let response = router
        .oneshot(post_apply(&form()))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], true);
    let id = payload["applicationId"].as_str().expect("id returned");
    assert!(id.starts_with("APP-"));
    assert_eq!(store.count().await.expect("count"), 1);
}

#[tokio::test]
async fn submit_rejects_unknown_position() {
    let (router, store) = build_router();
    let mut body = form();
    body["position"] = json!("crypto-evangelist");

    let response = router
        .oneshot(post_apply(&body))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], "Invalid position selected");
    assert_eq!(store.count().await.expect("count"), 0);
}

#[tokio::test]
async fn submit_rejects_missing_fields() {
    let (router, _) = build_router();
    let mut body = form();
    body.as_object_mut().expect("object").remove("phone");

    let response = router
        .oneshot(post_apply(&body))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["message"],
        "Missing required fields. Please fill in all required information."
    );
}

#[tokio::test]
async fn submit_rejects_malformed_email() {
    let (router, _) = build_router();
    let mut body = form();
    body["email"] = json!("maya at example dot com");

    let response = router
        .oneshot(post_apply(&body))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], "Please enter a valid email address.");
}

#[tokio::test]
async fn lookup_returns_safe_subset() {
    let store = Arc::new(crate::store::MemoryCollection::new());
    let service = Arc::new(ApplicationService::new(
        store.clone(),
        Arc::new(CapturingNotifier::default()),
    ));
    let stored = service.create(application()).await.expect("create");
    let router = careers_router(service);

    let response = router
        .oneshot(
            Request::get(format!("/api/jobs/apply?id={}", stored.id))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let view = payload.get("application").expect("application view");
    assert_eq!(view["id"], stored.id.as_str());
    assert_eq!(view["position"], "backend-engineer");
    assert_eq!(view["status"], "pending");
    assert!(view.get("email").is_none(), "contact details stay private");
    assert!(view.get("phone").is_none(), "contact details stay private");
}

#[tokio::test]
async fn lookup_of_unknown_id_is_not_found() {
    let (router, _) = build_router();

    let response = router
        .oneshot(
            Request::get("/api/jobs/apply?id=APP-0-missing00")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_without_id_is_rejected() {
    let (router, _) = build_router();

    let response = router
        .oneshot(
            Request::get("/api/jobs/apply")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], "Application ID is required");
}

#[tokio::test]
async fn submit_maps_store_outage_to_internal_error() {
    let service = Arc::new(ApplicationService::new(
        Arc::new(UnavailableStore),
        Arc::new(CapturingNotifier::default()),
    ));
    let router = careers_router(service);

    let response = router
        .oneshot(post_apply(&form()))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
