use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::AppState;

/// Header carrying the shared admin secret.
pub const ADMIN_HEADER: &str = "x-admin-secret";

/// Extractor guarding admin handlers. Succeeds only when the header matches
/// the configured secret exactly; with no secret configured it always fails.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_secret.as_deref() else {
            tracing::warn!(path = %parts.uri.path(), "Admin request refused, no ADMIN_SECRET configured");
            return Err(AppError::Unauthorized);
        };

        let provided = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided == Some(expected) {
            Ok(AdminAuth)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Admin request with missing or wrong secret");
            Err(AppError::Unauthorized)
        }
    }
}
