mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let (status, json) = send_json(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "ok": true }));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/not-a-real-route")).await;

    // Non-existent routes should return 404 Not Found
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_initial_state() {
    let app = test_app().await;

    let json = state(&app).await;

    assert_eq!(json["raised"], 0);
    assert_eq!(json["donationCount"], 0);
    assert_eq!(json["goal"], 3500);
    assert_eq!(json["bio"], "");
    assert_eq!(json["takenNumbers"], json!([]));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = test_app().await;

    let (status, json) = send_json(&app, get("/api-doc/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    let paths = json["paths"].as_object().unwrap();
    for path in [
        "/api/health",
        "/api/state",
        "/api/donations",
        "/api/export.csv",
        "/api/admin/state",
        "/api/admin/reset",
        "/api/admin/numbers",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

/// Donate 3 and 7, then try to take 7 again.
#[tokio::test]
async fn test_donate_then_conflict_scenario() {
    let app = test_app().await;

    let (status, json) = send_json(
        &app,
        post_json("/api/donations", &donation(10, &[3, 7], "venmo")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json, json!({ "ok": true }));

    let after_first = state(&app).await;
    assert_eq!(after_first["raised"], 10);
    assert_eq!(after_first["donationCount"], 1);
    assert_eq!(after_first["takenNumbers"], json!([3, 7]));
    assert_eq!(after_first["goal"], 3500);

    let (status, json) = send_json(
        &app,
        post_json("/api/donations", &donation(16, &[7, 9], "venmo")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["conflicts"], json!([7]));
    assert!(json["error"].as_str().unwrap().contains('7'));

    assert_eq!(state(&app).await, after_first);
}
