// Export all route modules
pub mod admin;
pub mod public;

// Re-export all route handlers for easy importing
pub use admin::*;
pub use public::*;

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement body shared by write endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
    /// Extra note for the operator, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true, message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
        }
    }
}
