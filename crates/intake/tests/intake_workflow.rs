//! End-to-end scenarios driven through the public routers and services, the
//! way the deployed binary wires them together.

mod common {
    use std::sync::Arc;

    use intake::admin::{admin_router, AdminState};
    use intake::careers::{careers_router, Application, ApplicationService, Position};
    use intake::config::AdminConfig;
    use intake::contact::{contact_router, Contact, ContactService};
    use intake::notify::LogNotifier;
    use intake::store::MemoryCollection;
    use intake::waitlist::{waitlist_router, WaitlistEntry, WaitlistService};

    pub(crate) const TOKEN: &str = "integration-admin-token";

    pub(crate) type MemoryServices = AdminState<
        MemoryCollection<Contact>,
        MemoryCollection<Application>,
        MemoryCollection<WaitlistEntry>,
        LogNotifier,
    >;

    pub(crate) fn services() -> MemoryServices {
        let notifier = Arc::new(LogNotifier);
        AdminState {
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
            tokens: AdminConfig::new(vec![TOKEN.to_string()]),
        }
    }

    /// The full route surface a deployment exposes, minus the api-crate
    /// introspection endpoints.
    pub(crate) fn full_router(services: MemoryServices) -> axum::Router {
        contact_router(services.contacts.clone())
            .merge(careers_router(services.applications.clone()))
            .merge(waitlist_router(services.waitlist.clone()))
            .merge(admin_router(services))
    }

    pub(crate) fn sample_application() -> Application {
        Application::new(
            "Maya",
            "Okafor",
            "maya@example.com",
            "515-555-0100",
            Position::BackendEngineer,
        )
    }

    pub(crate) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod contact_flow {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn submission_lands_on_the_admin_dashboard() {
        let services = services();
        let router = full_router(services.clone());

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/contact")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "name": "Ada Lovelace",
                            "email": "  Ada@Example.COM ",
                            "message": "  I would love a demo of the product.  "
                        }))
                        .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/admin/dashboard?type=contacts")
                    .header("authorization", format!("Bearer {TOKEN}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        let contacts = payload["data"].as_array().expect("array");
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0]["email"], "ada@example.com");
        assert_eq!(contacts[0]["message"], "I would love a demo of the product.");
        assert_eq!(contacts[0]["status"], "new");

        let id = contacts[0]["id"].as_str().expect("id");
        let response = router
            .oneshot(
                Request::put(format!("/api/admin/dashboard?type=contact&id={id}"))
                    .header("authorization", format!("Bearer {TOKEN}"))
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let stats = services.contacts.stats().await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.unread, 0);
    }

    #[tokio::test]
    async fn short_message_is_rejected_before_any_write() {
        let services = services();
        let router = full_router(services.clone());

        let response = router
            .oneshot(
                Request::post("/api/contact")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "name": "A",
                            "email": "a@b.com",
                            "message": "short"
                        }))
                        .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(services.contacts.all().await.is_empty());
    }
}

mod careers_flow {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn application_moves_through_the_pipeline() {
        let services = services();
        let router = full_router(services.clone());

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/jobs/apply")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "firstName": "Maya",
                            "lastName": "Okafor",
                            "email": "maya@example.com",
                            "phone": "515-555-0100",
                            "position": "ai-developer"
                        }))
                        .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let id = payload["applicationId"].as_str().expect("id").to_string();

        let response = router
            .clone()
            .oneshot(
                Request::put(format!("/api/admin/dashboard?type=application&id={id}"))
                    .header("authorization", format!("Bearer {TOKEN}"))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({"status": "hired", "notes": "start monday"}))
                            .expect("serialize"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get(format!("/api/jobs/apply?id={id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["application"]["status"], "hired");
    }

    #[tokio::test]
    async fn invalid_status_leaves_the_record_unchanged() {
        let services = services();
        let stored = services
            .applications
            .create(sample_application())
            .await
            .expect("create");
        let router = full_router(services.clone());

        let response = router
            .oneshot(
                Request::put(format!(
                    "/api/admin/dashboard?type=application&id={}",
                    stored.id
                ))
                .header("authorization", format!("Bearer {TOKEN}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"status": "promoted"})).expect("serialize"),
                ))
                .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let unchanged = services
            .applications
            .get(&stored.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(unchanged.status.label(), "pending");
    }
}

mod waitlist_flow {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn second_signup_signals_duplicate_and_count_is_stable() {
        let services = services();
        let router = full_router(services.clone());

        for (email, expect_duplicate) in
            [("grace@example.com", false), ("Grace@Example.com", true)]
        {
            let response = router
                .clone()
                .oneshot(
                    Request::post("/api/waitlist")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            serde_json::to_vec(&json!({"email": email})).expect("serialize"),
                        ))
                        .expect("request"),
                )
                .await
                .expect("router dispatch");

            assert_eq!(response.status(), StatusCode::OK);
            let payload = read_json_body(response).await;
            assert_eq!(payload["duplicate"].as_bool().unwrap_or(false), expect_duplicate);
        }

        assert_eq!(services.waitlist.count().await, 1);
    }
}

mod admin_auth {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn stats_without_authorization_header_is_unauthorized() {
        let router = full_router(services());

        let response = router
            .oneshot(
                Request::get("/api/admin/dashboard?type=stats")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_outside_the_allowlist_is_unauthorized() {
        let router = full_router(services());

        let response = router
            .oneshot(
                Request::get("/api/admin/dashboard?type=stats")
                    .header("authorization", "Bearer not-on-the-list")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

mod durable_backend {
    use super::common::*;
    use chrono::Duration;
    use intake::careers::Application;
    use intake::contact::Contact;
    use intake::store::{RecordStore, SqliteStore};
    use intake::waitlist::WaitlistEntry;

    #[tokio::test]
    async fn listings_are_newest_first_across_collections() {
        let store = SqliteStore::open_in_memory().await.expect("open store");

        let contacts = store.collection::<Contact>();
        let mut early = Contact::new("Ada", "ada@example.com", "a valid message body");
        early.timestamp = early.timestamp - Duration::hours(3);
        let early = contacts.insert(early).await.expect("insert");
        let late = contacts
            .insert(Contact::new("Grace", "grace@example.com", "another valid note"))
            .await
            .expect("insert");

        let ids: Vec<String> = contacts
            .all()
            .await
            .expect("all")
            .into_iter()
            .map(|contact| contact.id)
            .collect();
        assert_eq!(ids, vec![late.id, early.id]);

        let applications = store.collection::<Application>();
        let mut backdated = sample_application();
        backdated.applied_at = backdated.applied_at - Duration::days(1);
        backdated.last_updated = backdated.applied_at;
        let backdated = applications.insert(backdated).await.expect("insert");
        let fresh = applications
            .insert(sample_application())
            .await
            .expect("insert");

        let ids: Vec<String> = applications
            .all()
            .await
            .expect("all")
            .into_iter()
            .map(|application| application.id)
            .collect();
        assert_eq!(ids, vec![fresh.id, backdated.id]);

        let waitlist = store.collection::<WaitlistEntry>();
        let mut first = WaitlistEntry::new("grace@example.com", None);
        first.joined_at = first.joined_at - Duration::minutes(30);
        let first = waitlist.insert(first).await.expect("insert");
        let second = waitlist
            .insert(WaitlistEntry::new("ada@example.com", None))
            .await
            .expect("insert");

        let ids: Vec<String> = waitlist
            .all()
            .await
            .expect("all")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn services_run_unchanged_on_the_durable_backend() {
        use intake::notify::LogNotifier;
        use intake::waitlist::{Signup, WaitlistService};
        use std::sync::Arc;

        let store = SqliteStore::open_in_memory().await.expect("open store");
        let service = WaitlistService::new(
            Arc::new(store.collection::<WaitlistEntry>()),
            Arc::new(LogNotifier),
        );

        let outcome = service
            .join(WaitlistEntry::new("grace@example.com", Some("Grace")))
            .await
            .expect("join");
        assert!(matches!(outcome, Signup::Created(_)));

        let outcome = service
            .join(WaitlistEntry::new("GRACE@example.com", None))
            .await
            .expect("join");
        assert_eq!(outcome, Signup::AlreadyJoined);
        assert_eq!(service.count().await, 1);
    }
}
