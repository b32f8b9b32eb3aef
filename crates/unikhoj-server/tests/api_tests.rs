//! Integration tests for the `UniKhoj` HTTP API.
//!
//! Requests go through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`, backed by an in-memory store. No socket
//! or database is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use unikhoj_core::lead::{Lead, LeadId, NewLead, TestType};
use unikhoj_server::config::ServerConfig;
use unikhoj_server::routes::build_router;
use unikhoj_server::state::AppState;
use unikhoj_storage::{LeadStore, MemoryStore, StorageError};

// ── Helpers ──────────────────────────────────────────────────────────

fn app_with(store: Arc<dyn LeadStore>) -> Router {
    build_router(AppState::new(store), &ServerConfig::default())
}

fn app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    (app_with(Arc::new(store.clone())), store)
}

fn valid_body() -> Value {
    json!({
        "fullName": "Ram Sharma",
        "phone": "9812345678",
        "email": "",
        "degree": "bachelors",
        "gpa": "3.5",
        "testType": "none",
        "testScore": "",
        "country": "USA",
        "budget": "15-25L"
    })
}

async fn post_raw(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::post("/api/leads")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_lead(app: Router, body: &Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

async fn only_lead(store: &MemoryStore) -> Lead {
    let mut leads = store.leads().await;
    assert_eq!(leads.len(), 1, "expected exactly one stored lead");
    leads.remove(0)
}

/// A store whose every call fails.
struct FailingStore;

#[async_trait::async_trait]
impl LeadStore for FailingStore {
    async fn create(&self, _lead: NewLead) -> Result<Lead, StorageError> {
        Err(StorageError::Write {
            id: "-".to_owned(),
            reason: "connection refused".to_owned(),
        })
    }

    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StorageError> {
        Err(StorageError::Read {
            id: id.to_string(),
            reason: "connection refused".to_owned(),
        })
    }
}

// ── POST /api/leads ──────────────────────────────────────────────────

#[tokio::test]
async fn valid_lead_is_created() {
    let (app, store) = app();
    let (status, body) = post_lead(app, &valid_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));

    let lead = only_lead(&store).await;
    assert_eq!(body["id"], json!(lead.id.to_string()));
    assert_eq!(lead.full_name, "Ram Sharma");
    assert_eq!(lead.test_type, TestType::None);
    assert_eq!(lead.test_score, None);
    assert_eq!(lead.email, None);
    assert_eq!(lead.created_at, lead.updated_at);
}

#[tokio::test]
async fn missing_budget_is_rejected() {
    let (app, store) = app();
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("budget");

    let (status, body) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields" }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (app, store) = app();
    let mut body = valid_body();
    body["fullName"] = json!("   ");

    let (status, body) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing required fields"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn duplicate_submissions_create_two_leads() {
    let (app, store) = app();

    let (first, a) = post_lead(app.clone(), &valid_body()).await;
    let (second, b) = post_lead(app, &valid_body()).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    assert_ne!(a["id"], b["id"]);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn unknown_degree_is_rejected() {
    let (app, store) = app();
    let mut body = valid_body();
    body["degree"] = json!("phd");

    let (status, body) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid field value" }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (app, store) = app();
    let (status, body) = post_raw(app, "{\"fullName\": ".to_owned()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request body" }));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn storage_failure_is_a_generic_500() {
    let app = app_with(Arc::new(FailingStore));
    let (status, body) = post_lead(app, &valid_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn omitted_test_type_defaults_to_ielts() {
    let (app, store) = app();
    let mut body = valid_body();
    let fields = body.as_object_mut().unwrap();
    fields.remove("testType");
    fields.insert("testScore".to_owned(), json!("7.5"));

    let (status, _) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    let lead = only_lead(&store).await;
    assert_eq!(lead.test_type, TestType::Ielts);
    assert_eq!(lead.test_score.as_deref(), Some("7.5"));
}

#[tokio::test]
async fn score_without_a_test_is_not_stored() {
    let (app, store) = app();
    let mut body = valid_body();
    body["testScore"] = json!("110");

    let (status, _) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(only_lead(&store).await.test_score, None);
}

#[tokio::test]
async fn email_is_trimmed_and_lowercased() {
    let (app, store) = app();
    let mut body = valid_body();
    body["email"] = json!("  Ram.Sharma@Example.COM ");

    let (status, _) = post_lead(app, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        only_lead(&store).await.email.as_deref(),
        Some("ram.sharma@example.com")
    );
}

#[tokio::test]
async fn responses_carry_nosniff() {
    let (app, _) = app();
    let request = Request::get("/api/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::X_CONTENT_TYPE_OPTIONS],
        "nosniff"
    );
}

// ── GET /api/health ──────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app();
    let request = Request::get("/api/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn health_ignores_a_broken_store() {
    let app = app_with(Arc::new(FailingStore));
    let request = Request::get("/api/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
