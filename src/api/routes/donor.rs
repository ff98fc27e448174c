//! Donor-facing routes: profile overview and donation request submission.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::app_state::AppState;
use super::auth_context::{AuthContext, Capability};
use super::error::ApiError;
use crate::models::{Donor, DonationRequest};
use crate::services::donation_service;

pub fn donor_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/requests", get(list_my_requests).post(submit_request))
}

/// Donor profile plus cooldown outlook.
#[derive(Serialize, ToSchema)]
pub struct DonorProfileResponse {
    pub donor: Donor,
    pub blood_type: Option<String>,
    pub can_submit: bool,
    pub next_request_date: Option<NaiveDate>,
}

/// GET /donor/profile
#[utoipa::path(
    get,
    path = "/donor/profile",
    tag = "Donor",
    responses(
        (status = 200, description = "Donor profile", body = DonorProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a donor"),
        (status = 404, description = "Donor profile not found")
    ),
    security(("session_header" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<DonorProfileResponse>, ApiError> {
    ctx.require(Capability::SubmitDonationRequest)?;

    let donor = donation_service::donor_profile(&state.pool, ctx.user_id).await?;

    let blood_type: Option<String> = match donor.blood_type_id {
        Some(id) => {
            sqlx::query_scalar("SELECT type_name FROM blood_types WHERE blood_type_id = ?")
                .bind(id)
                .fetch_optional(&state.pool)
                .await
                .map_err(crate::services::WorkflowError::from)?
        }
        None => None,
    };

    let today = Utc::now().date_naive();
    let next_request_date =
        donation_service::next_allowed_request(&state.pool, ctx.user_id).await?;
    let can_submit = next_request_date.map_or(true, |d| today >= d);

    Ok(Json(DonorProfileResponse {
        donor,
        blood_type,
        can_submit,
        next_request_date,
    }))
}

/// GET /donor/requests
#[utoipa::path(
    get,
    path = "/donor/requests",
    tag = "Donor",
    responses(
        (status = 200, description = "Own donation requests, newest first", body = [DonationRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a donor")
    ),
    security(("session_header" = []))
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<DonationRequest>>, ApiError> {
    ctx.require(Capability::SubmitDonationRequest)?;
    let requests = donation_service::list_for_donor(&state.pool, ctx.user_id).await?;
    Ok(Json(requests))
}

/// POST /donor/requests
#[utoipa::path(
    post,
    path = "/donor/requests",
    tag = "Donor",
    responses(
        (status = 200, description = "Pending request created", body = DonationRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a donor"),
        (status = 409, description = "A pending request already exists"),
        (status = 422, description = "Cooldown active")
    ),
    security(("session_header" = []))
)]
pub async fn submit_request(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<DonationRequest>, ApiError> {
    ctx.require(Capability::SubmitDonationRequest)?;
    let today = Utc::now().date_naive();
    let request = donation_service::submit(&state.pool, ctx.user_id, today).await?;
    Ok(Json(request))
}
