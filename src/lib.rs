use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod forward;
pub mod ledger;
pub mod routes;
pub mod settings;
pub mod validation;

use config::Config;

/// Shared handles given to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    /// Serializes ledger writes within this process
    pub claim_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            http_client: forward::create_client(),
            claim_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pledgeboard API",
        version = "0.1.0",
        description = "Number-slot fundraiser: claim numbers, record donations, track progress"
    ),
    paths(
        routes::health_check,
        routes::get_state,
        routes::create_donation,
        routes::export_csv,
        routes::update_state,
        routes::reset_state,
        routes::mark_numbers
    ),
    components(schemas(
        routes::OkResponse,
        ledger::FundraiserState,
        validation::DonationRequest,
        validation::PaymentMethod,
        routes::StateUpdateRequest,
        routes::MarkNumbersRequest
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(routes::health_check))
        .route("/api/state", get(routes::get_state))
        .route("/api/donations", post(routes::create_donation))
        .route("/api/export.csv", get(routes::export_csv))
        .route("/api/admin/state", post(routes::update_state))
        .route("/api/admin/reset", post(routes::reset_state))
        .route("/api/admin/numbers", post(routes::mark_numbers));

    Router::new()
        .merge(api_routes)
        .route("/api-doc/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
