use axum::{
    http::StatusCode,
    response::IntoResponse,
};
use http_body_util::BodyExt;
use pledgeboard::error::AppError;
use serde_json::{json, Value};

async fn body_json(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error1 = AppError::InvalidRequest("amount must be a positive integer".to_string());
    assert_eq!(error1.to_string(), "Invalid request: amount must be a positive integer");

    let error2 = AppError::Conflict(vec![7, 9]);
    assert_eq!(error2.to_string(), "Numbers already claimed: 7, 9");

    let error3 = AppError::Unauthorized;
    assert_eq!(error3.to_string(), "Unauthorized");

    let error4 = AppError::Database("connection refused".to_string());
    assert_eq!(error4.to_string(), "Database error: connection refused");
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_app_error_into_response() {
    let (status, body) = body_json(AppError::InvalidRequest("donorName is required".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request: donorName is required");

    let (status, body) = body_json(AppError::Conflict(vec![7])).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["conflicts"], json!([7]));
    assert_eq!(body["error"], "Numbers already claimed: 7");

    let (status, body) = body_json(AppError::Unauthorized).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_store_errors_hide_details() {
    let (status, body) = body_json(AppError::Database("password authentication failed".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (status, body) = body_json(AppError::from(sea_orm::DbErr::Custom("boom".to_string()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("conflicts").is_none());

    let internal = AppError::InternalError("raised total overflows at donation 2".to_string());
    assert_eq!(
        internal.to_string(),
        "Internal Server Error: raised total overflows at donation 2"
    );
    let (status, body) = body_json(internal).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
