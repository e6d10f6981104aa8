use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::error::AppError;
use crate::export::donations_to_csv;
use crate::forward::{spawn_forward, ForwardPayload};
use crate::ledger::{list_donations, record_donation};
use crate::routes::OkResponse;
use crate::settings::{parse_goal, reset_settings, update_settings, SettingsUpdate};
use crate::validation::{parse_amount, parse_numbers, NewDonation, PaymentMethod};
use crate::AppState;

pub const MANUAL_DONOR_NAME: &str = "Manual entry";
pub const MANUAL_PLACEHOLDER: &str = "n/a";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StateUpdateRequest {
    /// New bio text; omit to keep the current one
    #[serde(default)]
    pub bio: Option<String>,
    /// New goal as an integer or numeric string; unparsable values reset it to 3500
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 5000)]
    pub goal: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkNumbersRequest {
    /// Slot numbers to mark as donated
    #[serde(default)]
    #[schema(value_type = Vec<i32>, example = json!([12, 40]))]
    pub numbers: Option<Value>,
    /// Amount received; defaults to the sum of the numbers
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub donor_phone: Option<String>,
    #[serde(default)]
    pub donor_address: Option<String>,
}

impl MarkNumbersRequest {
    fn into_donation(self) -> Result<NewDonation, AppError> {
        let numbers = parse_numbers(self.numbers.as_ref())?;
        let amount = match self.amount {
            Some(ref raw) => parse_amount(Some(raw))?,
            None => numbers.iter().map(|&n| i64::from(n)).sum(),
        };

        Ok(NewDonation {
            amount,
            numbers,
            method: PaymentMethod::Manual,
            donor_name: or_placeholder(self.donor_name, MANUAL_DONOR_NAME),
            donor_phone: or_placeholder(self.donor_phone, MANUAL_PLACEHOLDER),
            donor_address: or_placeholder(self.donor_address, MANUAL_PLACEHOLDER),
        })
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

/// Download every donation record as CSV
#[utoipa::path(
    get,
    path = "/api/export.csv",
    params(("x-admin-secret" = String, Header, description = "Shared admin secret")),
    responses(
        (status = 200, description = "CSV attachment, one row per donation", body = String, content_type = "text/csv"),
        (status = 401, description = "Missing or wrong admin secret")
    )
)]
pub async fn export_csv(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let donations = list_donations(&state.db).await?;
    let csv = donations_to_csv(&donations)?;
    tracing::info!(rows = donations.len(), "Exported donations");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"donations.csv\""),
        ],
        csv,
    ))
}

/// Update the bio and/or goal
#[utoipa::path(
    post,
    path = "/api/admin/state",
    params(("x-admin-secret" = String, Header, description = "Shared admin secret")),
    request_body = StateUpdateRequest,
    responses(
        (status = 200, description = "Settings updated", body = OkResponse),
        (status = 400, description = "Body is not a JSON object"),
        (status = 401, description = "Missing or wrong admin secret")
    )
)]
pub async fn update_state(
    _admin: AdminAuth,
    State(state): State<AppState>,
    payload: Result<Json<StateUpdateRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, AppError> {
    let Json(request) = payload?;
    let update = SettingsUpdate {
        goal: request.goal.as_ref().map(parse_goal),
        bio: request.bio,
    };

    let saved = update_settings(&state.db, update).await?;
    tracing::info!(goal = saved.goal, bio_len = saved.bio.len(), "Updated fundraiser settings");

    Ok(Json(OkResponse::ok()))
}

/// Reset goal and bio to their defaults. Donation records are kept.
#[utoipa::path(
    post,
    path = "/api/admin/reset",
    params(("x-admin-secret" = String, Header, description = "Shared admin secret")),
    responses(
        (status = 200, description = "Settings reset", body = OkResponse),
        (status = 401, description = "Missing or wrong admin secret")
    ),
    description = "Only the goal and bio are reset. To start over completely, delete the donation records directly in the database."
)]
pub async fn reset_state(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    reset_settings(&state.db).await?;
    tracing::info!("Reset fundraiser settings to defaults");

    Ok(Json(OkResponse::with_message(
        "Settings reset. Donation records were kept; clear them directly in the database if needed.",
    )))
}

/// Mark numbers as donated on behalf of someone who paid outside the page
#[utoipa::path(
    post,
    path = "/api/admin/numbers",
    params(("x-admin-secret" = String, Header, description = "Shared admin secret")),
    request_body = MarkNumbersRequest,
    responses(
        (status = 201, description = "Manual donation recorded", body = OkResponse),
        (status = 400, description = "Missing or malformed numbers or amount"),
        (status = 401, description = "Missing or wrong admin secret"),
        (status = 409, description = "Some numbers are already claimed")
    )
)]
pub async fn mark_numbers(
    _admin: AdminAuth,
    State(state): State<AppState>,
    payload: Result<Json<MarkNumbersRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OkResponse>), AppError> {
    let Json(request) = payload?;
    let new = request.into_donation()?;

    let saved = record_donation(&state.db, &state.claim_lock, new).await?;
    spawn_forward(
        &state.http_client,
        state.config.forward_url.as_deref(),
        ForwardPayload::from(&saved),
    );

    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}
