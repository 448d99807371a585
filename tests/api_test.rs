//! Integration tests for the API layer against a local mock server.
//!
//! Every test builds its own `mockito` server and an in-memory session store,
//! so nothing touches the user's keyring or configuration.

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use refdesk::api::common::{Filters, ListMeta, TIMEOUT_MESSAGE};
use refdesk::api::resources::{AppointmentFields, Credentials, ListParams};
use refdesk::api::{ApiClient, ErrorKind};
use refdesk::auth::{MemorySessionStore, SessionStore};

// ── Helpers ─────────────────────────────────────────────────────────

fn client_for(server: &ServerGuard, store: Arc<MemorySessionStore>) -> ApiClient {
    ApiClient::builder(format!("{}/api", server.url()))
        .with_session(store, None)
        .build()
        .unwrap()
}

fn anonymous_client(server: &ServerGuard) -> ApiClient {
    client_for(server, Arc::new(MemorySessionStore::new()))
}

// ── List coercion ───────────────────────────────────────────────────

#[tokio::test]
async fn test_bare_and_paginated_lists_normalize_identically() {
    let mut server = Server::new_async().await;
    let bare = server
        .mock("GET", "/api/venues/")
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "name": "Rufaro"}]"#)
        .create_async()
        .await;
    let paginated = server
        .mock("GET", "/api/teams/")
        .with_header("content-type", "application/json")
        .with_body(r#"{"count": 1, "next": null, "previous": null, "results": [{"id": 1, "name": "Rufaro"}]}"#)
        .create_async()
        .await;

    let client = anonymous_client(&server);
    let venues = client.venues().list(&Filters::new()).await.unwrap();
    let teams = client.teams().list(&Filters::new()).await.unwrap();

    bare.assert_async().await;
    paginated.assert_async().await;
    assert_eq!(venues.data, teams.data);
    assert_eq!(venues.data[0]["name"], "Rufaro");
    assert!(venues.meta.is_none());
}

#[tokio::test]
async fn test_unrecognized_list_body_yields_empty_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/matches/")
        .with_body(r#"{"unexpected": {"id": 3}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/referee/")
        .with_status(200)
        .create_async()
        .await;

    let client = anonymous_client(&server);
    assert!(client.matches().list(&Filters::new()).await.unwrap().data.is_empty());
    assert!(client.referees().list(&Filters::new()).await.unwrap().data.is_empty());
}

#[tokio::test]
async fn test_filters_skip_missing_and_empty_values() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/referee/")
        .match_query(Matcher::Exact("team=A".to_string()))
        .with_body("[]")
        .create_async()
        .await;

    let filters = Filters::new()
        .with("team", "A")
        .with("venue", "")
        .with_opt::<&str>("date", None);
    anonymous_client(&server).referees().list(&filters).await.unwrap();

    mock.assert_async().await;
}

// ── Interceptors ────────────────────────────────────────────────────

#[tokio::test]
async fn test_stored_token_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/auth/user/")
        .match_header("authorization", "Token abc123")
        .with_body(r#"{"username": "tmoyo"}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::with_token("abc123"));
    let user = client_for(&server, store).auth().current_user().await.unwrap();

    mock.assert_async().await;
    assert_eq!(user["username"], "tmoyo");
}

#[tokio::test]
async fn test_no_token_sends_no_authorization_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"username": "tmoyo", "password": "s3cret"})))
        .with_body(r#"{"token": "9944b091"}"#)
        .create_async()
        .await;

    let response = anonymous_client(&server)
        .auth()
        .login(&Credentials::new("tmoyo", "s3cret"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response["token"], "9944b091");
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_notifies_once() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/appointments/7/")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::with_token("stale"));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let client = ApiClient::builder(format!("{}/api", server.url()))
        .with_session(
            store.clone(),
            Some(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        )
        .build()
        .unwrap();

    let err = client.appointments().get("7").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.status(), Some(401));
    assert!(!err.message().is_empty());
    assert_eq!(err.message(), "Invalid token.");
    assert!(store.get().unwrap().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_non_auth_failures_keep_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/venues/3/")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .create_async()
        .await;

    let store = Arc::new(MemorySessionStore::with_token("valid"));
    let err = client_for(&server, store.clone()).venues().get("3").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "Not found.");
    assert_eq!(store.get().unwrap().as_deref(), Some("valid"));
}

// ── Error messages ──────────────────────────────────────────────────

#[tokio::test]
async fn test_message_priority_and_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/venues/")
        .with_status(500)
        .with_body(r#"{"error": "Database unavailable", "detail": "ignored"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/teams/")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;
    server
        .mock("GET", "/api/matches/")
        .with_status(500)
        .with_body("{}")
        .create_async()
        .await;

    let client = anonymous_client(&server);

    let err = client.venues().list(&Filters::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "Database unavailable");

    let err = client.teams().list(&Filters::new()).await.unwrap_err();
    assert_eq!(err.message(), "Bad Gateway");

    let err = client.matches().list(&Filters::new()).await.unwrap_err();
    assert_eq!(err.message(), "Failed to fetch matches");
}

#[tokio::test]
async fn test_single_match_timeout_uses_timeout_message() {
    // Accepts connections at the socket level but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());

    let client = ApiClient::builder(base_url)
        .with_session(Arc::new(MemorySessionStore::new()), None)
        .build()
        .unwrap();

    let err = client
        .matches()
        .timeout(Duration::from_millis(200))
        .get("12")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.message(), TIMEOUT_MESSAGE);
    assert_eq!(err.transport_message(), Some("timeout of 200ms exceeded"));
    drop(listener);
}

// ── Appointments ────────────────────────────────────────────────────

#[tokio::test]
async fn test_appointment_list_requests_page_and_computes_meta() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/appointments/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("page_size".into(), "20".into()),
            Matcher::UrlEncoded("ordering".into(), "-appointment_date,appointment_time".into()),
            Matcher::UrlEncoded("status".into(), "upcoming".into()),
        ]))
        .with_body(
            json!({
                "count": 45,
                "next": "http://svc/api/appointments/?page=3",
                "previous": "http://svc/api/appointments/?page=1",
                "results": [{"id": 21}, {"id": 22}],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let params = ListParams::page(2).filters(Filters::new().with("status", "upcoming"));
    let page = anonymous_client(&server).appointments().list(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.data.len(), 2);
    assert_eq!(
        page.meta,
        Some(ListMeta {
            count: 45,
            next: Some("http://svc/api/appointments/?page=3".to_string()),
            previous: Some("http://svc/api/appointments/?page=1".to_string()),
            current_page: 2,
            total_pages: 3,
        })
    );
}

#[tokio::test]
async fn test_appointment_list_counts_bare_sequences() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/appointments/")
        .match_query(Matcher::Any)
        .with_body(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#)
        .create_async()
        .await;

    let page = anonymous_client(&server)
        .appointments()
        .list(&ListParams::default())
        .await
        .unwrap();

    let meta = page.meta.unwrap();
    assert_eq!(meta.count, 3);
    assert_eq!(meta.total_pages, 1);
    assert_eq!(meta.current_page, 1);
    assert!(meta.next.is_none());
}

#[tokio::test]
async fn test_appointment_create_shapes_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/appointments/")
        .match_body(Matcher::Json(json!({
            "referee": 4,
            "venue": 2,
            "match": 31,
            "appointment_date": "2026-03-14",
            "appointment_time": "9:00",
            "distance": 0,
            "status": "upcoming",
        })))
        .with_status(201)
        .with_body(r#"{"id": 88, "status": "upcoming"}"#)
        .create_async()
        .await;

    let fields: AppointmentFields = serde_json::from_value(json!({
        "referee": 4,
        "venue": 2,
        "match": 31,
        "appointment_date": "2026-03-14",
        "appointment_time": "9",
        "status": "completed",
        "notes": "dropped",
    }))
    .unwrap();
    let created = anonymous_client(&server).appointments().create(fields).await.unwrap();

    mock.assert_async().await;
    assert_eq!(created["id"], 88);
}

#[tokio::test]
async fn test_appointment_create_reports_field_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/appointments/")
        .with_status(400)
        .with_body(r#"{"venue": ["This field is required."]}"#)
        .create_async()
        .await;
    let err = anonymous_client(&server)
        .appointments()
        .create(AppointmentFields::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "venue: This field is required.");
}

#[tokio::test]
async fn test_appointment_update_and_delete() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", "/api/appointments/88/")
        .match_body(Matcher::Json(json!({
            "appointment_id": 88,
            "appointment_time": "14:30",
            "distance": 12.5,
            "status": "declined",
            "decline_reason": "Injured",
        })))
        .with_body(r#"{"id": 88, "status": "declined"}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/appointments/88/")
        .with_status(204)
        .create_async()
        .await;

    let client = anonymous_client(&server);
    let fields = AppointmentFields {
        appointment_id: Some(json!(88)),
        appointment_time: Some(json!("14:30")),
        distance: Some(json!(12.5)),
        status: Some("declined".to_string()),
        decline_reason: Some("Injured".to_string()),
        ..AppointmentFields::default()
    };

    let updated = client.appointments().update("88", fields).await.unwrap();
    client.appointments().delete("88").await.unwrap();

    update.assert_async().await;
    delete.assert_async().await;
    assert_eq!(updated["status"], "declined");
}

#[tokio::test]
async fn test_delete_failure_uses_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/availability/5/")
        .with_status(500)
        .create_async()
        .await;

    let err = anonymous_client(&server)
        .availability()
        .delete("5")
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Failed to delete availability");
}

#[tokio::test]
async fn test_referee_update_patches_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/api/referee/4/")
        .match_body(Matcher::Json(json!({"level": "national"})))
        .with_body(r#"{"id": 4, "level": "national"}"#)
        .create_async()
        .await;

    let referee = anonymous_client(&server)
        .referees()
        .update("4", json!({"level": "national"}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(referee["level"], "national");
}
