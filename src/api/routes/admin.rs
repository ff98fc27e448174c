//! Admin routes: approval workflows, medical verification, and statistics.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use super::app_state::AppState;
use super::auth_context::{AuthContext, Capability};
use super::error::{ApiError, ApiMessage};
use crate::models::{BloodSupplyRequestRow, DonationRequest, DonationRow, RequestStatus};
use crate::services::stats_service::{self, Statistics};
use crate::services::{blood_request_service, donation_service, verification_service};

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/donation-requests", get(list_donation_requests))
        .route("/donation-requests/{id}/approve", post(approve_donation_request))
        .route("/donation-requests/{id}/reject", post(reject_donation_request))
        .route("/blood-requests", get(list_blood_requests))
        .route("/blood-requests/{id}/approve", post(approve_blood_request))
        .route("/blood-requests/{id}/reject", post(reject_blood_request))
        .route("/donations", get(list_donations))
        .route("/donors/{user_id}/verify-medical", post(verify_donor_medical))
        .route("/statistics", get(statistics))
}

/// Status filter query. `All` (or absence) selects every state.
#[derive(Deserialize, IntoParams)]
pub struct StatusFilter {
    status: Option<String>,
}

impl StatusFilter {
    fn parse(&self) -> Result<Option<RequestStatus>, ApiError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("All") | Some("all") => Ok(None),
            Some(value) => RequestStatus::parse(value).map(Some).ok_or_else(|| {
                ApiError::bad_request(format!("Unknown status filter '{value}'"))
            }),
        }
    }
}

/// GET /admin/donation-requests
#[utoipa::path(
    get,
    path = "/admin/donation-requests",
    tag = "Admin",
    params(StatusFilter),
    responses(
        (status = 200, description = "Donation requests, newest first", body = [DonationRequest]),
        (status = 403, description = "Not an admin")
    ),
    security(("session_header" = []))
)]
pub async fn list_donation_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<DonationRequest>>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    let status = filter.parse()?;
    let requests = donation_service::list_by_status(&state.pool, status).await?;
    Ok(Json(requests))
}

/// POST /admin/donation-requests/{id}/approve
#[utoipa::path(
    post,
    path = "/admin/donation-requests/{id}/approve",
    tag = "Admin",
    params(("id" = i64, Path, description = "Donation request id")),
    responses(
        (status = 200, description = "Request approved", body = ApiMessage),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Request or donor not found"),
        (status = 409, description = "Already processed"),
        (status = 422, description = "Donor ineligible")
    ),
    security(("session_header" = []))
)]
pub async fn approve_donation_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    let today = Utc::now().date_naive();
    donation_service::approve(&state.pool, id, ctx.user_id, today).await?;
    Ok(ApiMessage::ok("Donor request approved"))
}

/// POST /admin/donation-requests/{id}/reject
#[utoipa::path(
    post,
    path = "/admin/donation-requests/{id}/reject",
    tag = "Admin",
    params(("id" = i64, Path, description = "Donation request id")),
    responses(
        (status = 200, description = "Request rejected", body = ApiMessage),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already processed")
    ),
    security(("session_header" = []))
)]
pub async fn reject_donation_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    let today = Utc::now().date_naive();
    donation_service::reject(&state.pool, id, ctx.user_id, today).await?;
    Ok(ApiMessage::ok("Donor request rejected"))
}

/// GET /admin/blood-requests
#[utoipa::path(
    get,
    path = "/admin/blood-requests",
    tag = "Admin",
    params(StatusFilter),
    responses(
        (status = 200, description = "Supply requests, newest first", body = [BloodSupplyRequestRow]),
        (status = 403, description = "Not an admin")
    ),
    security(("session_header" = []))
)]
pub async fn list_blood_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<BloodSupplyRequestRow>>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    let status = filter.parse()?;
    let requests = blood_request_service::list_by_status(&state.pool, status).await?;
    Ok(Json(requests))
}

/// POST /admin/blood-requests/{id}/approve
#[utoipa::path(
    post,
    path = "/admin/blood-requests/{id}/approve",
    tag = "Admin",
    params(("id" = i64, Path, description = "Blood request id")),
    responses(
        (status = 200, description = "Request approved and inventory debited", body = ApiMessage),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already processed or insufficient stock")
    ),
    security(("session_header" = []))
)]
pub async fn approve_blood_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    blood_request_service::approve(&state.pool, id, ctx.user_id).await?;
    Ok(ApiMessage::ok("Request approved successfully"))
}

/// POST /admin/blood-requests/{id}/reject
#[utoipa::path(
    post,
    path = "/admin/blood-requests/{id}/reject",
    tag = "Admin",
    params(("id" = i64, Path, description = "Blood request id")),
    responses(
        (status = 200, description = "Request rejected", body = ApiMessage),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already processed")
    ),
    security(("session_header" = []))
)]
pub async fn reject_blood_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    blood_request_service::reject(&state.pool, id, ctx.user_id).await?;
    Ok(ApiMessage::ok("Request rejected"))
}

/// GET /admin/donations
#[utoipa::path(
    get,
    path = "/admin/donations",
    tag = "Admin",
    responses(
        (status = 200, description = "Donation history, newest first", body = [DonationRow]),
        (status = 403, description = "Not an admin")
    ),
    security(("session_header" = []))
)]
pub async fn list_donations(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<DonationRow>>, ApiError> {
    ctx.require(Capability::ApproveRequests)?;
    let donations = donation_service::list_donations(&state.pool).await?;
    Ok(Json(donations))
}

/// POST /admin/donors/{user_id}/verify-medical
#[utoipa::path(
    post,
    path = "/admin/donors/{user_id}/verify-medical",
    tag = "Admin",
    params(("user_id" = i64, Path, description = "Donor's user id")),
    responses(
        (status = 200, description = "Donor medical data verified", body = ApiMessage),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Donor profile not found")
    ),
    security(("session_header" = []))
)]
pub async fn verify_donor_medical(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::VerifyDonors)?;
    let today = Utc::now().date_naive();
    verification_service::verify(&state.pool, user_id, ctx.user_id, today).await?;
    Ok(ApiMessage::ok("Donor medical data verified successfully"))
}

/// GET /admin/statistics
#[utoipa::path(
    get,
    path = "/admin/statistics",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard statistics", body = Statistics),
        (status = 403, description = "Not an admin")
    ),
    security(("session_header" = []))
)]
pub async fn statistics(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Statistics>, ApiError> {
    ctx.require(Capability::ViewStatistics)?;
    let stats = stats_service::statistics(&state.pool).await?;
    Ok(Json(stats))
}
