#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt; // For Response body handling
use pledgeboard::{config::Config, create_app, db, settings, AppState};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt; // For oneshot

pub const ADMIN_SECRET: &str = "test-secret";

// For initializing tracing once
static INIT: Once = Once::new();

fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// App backed by a fresh in-memory SQLite ledger, admin secret set.
pub async fn test_app() -> Router {
    test_app_with(Config {
        admin_secret: Some(ADMIN_SECRET.to_string()),
        ..Config::default()
    })
    .await
}

pub async fn test_app_with(config: Config) -> Router {
    test_app_on("sqlite::memory:", config).await.0
}

/// App plus a handle on its database, for writing rows behind the API.
pub async fn test_app_on(database_url: &str, config: Config) -> (Router, DatabaseConnection) {
    setup_tracing();
    let db = db::connect(database_url).await.unwrap();
    settings::ensure_settings(&db).await.unwrap();
    (create_app(AppState::new(db.clone(), config)), db)
}

/// App on a SQLite file in a fresh temp dir, so the pool holds several
/// connections. Keep the `TempDir` alive for the duration of the test.
pub async fn file_backed_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("ledger.sqlite").display());
    let (app, _) = test_app_on(
        &url,
        Config {
            admin_secret: Some(ADMIN_SECRET.to_string()),
            ..Config::default()
        },
    )
    .await;
    (app, dir)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).method("GET").body(Body::empty()).unwrap()
}

pub fn admin_get(uri: &str, secret: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .header("x-admin-secret", secret)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn admin_post_json(uri: &str, body: &Value, secret: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-admin-secret", secret)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request through the full middleware stack.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body_bytes).into_owned())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn state(app: &Router) -> Value {
    let (status, json) = send_json(app, get("/api/state")).await;
    assert_eq!(status, StatusCode::OK);
    json
}

pub fn donation(amount: i64, numbers: &[i32], method: &str) -> Value {
    serde_json::json!({
        "amount": amount,
        "numbers": numbers,
        "method": method,
        "donorName": "A",
        "donorPhone": "1",
        "donorAddress": "X"
    })
}
