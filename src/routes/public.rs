use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::forward::{spawn_forward, ForwardPayload};
use crate::ledger::{fetch_state, record_donation, FundraiserState};
use crate::routes::OkResponse;
use crate::validation::DonationRequest;
use crate::AppState;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = OkResponse)
    )
)]
pub async fn health_check() -> Json<OkResponse> {
    Json(OkResponse::ok())
}

/// Current progress: amount raised, donation count, goal, bio and taken numbers
#[utoipa::path(
    get,
    path = "/api/state",
    responses(
        (status = 200, description = "Aggregate fundraiser state", body = FundraiserState),
        (status = 500, description = "Ledger unavailable")
    )
)]
pub async fn get_state(State(state): State<AppState>) -> Result<Json<FundraiserState>, AppError> {
    Ok(Json(fetch_state(&state.db).await?))
}

/// Claim numbers and record a donation
#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = DonationRequest,
    responses(
        (status = 201, description = "Donation recorded", body = OkResponse),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Some numbers are already claimed; `conflicts` lists them")
    ),
    description = "Numbers are checked against every stored donation inside the same transaction that records the new one. The amount is taken as given and is not recomputed from the numbers."
)]
pub async fn create_donation(
    State(state): State<AppState>,
    payload: Result<Json<DonationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OkResponse>), AppError> {
    let Json(request) = payload?;
    let new = request.validate()?;

    let saved = record_donation(&state.db, &state.claim_lock, new).await?;
    spawn_forward(
        &state.http_client,
        state.config.forward_url.as_deref(),
        ForwardPayload::from(&saved),
    );

    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}
