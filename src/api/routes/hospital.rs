//! Hospital and blood bank routes: blood supply request submission and
//! request history.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use super::app_state::AppState;
use super::auth_context::{AuthContext, Capability};
use super::error::ApiError;
use crate::models::BloodSupplyRequest;
use crate::services::blood_request_service;

pub fn hospital_router() -> Router<AppState> {
    Router::new().route("/requests", get(list_my_requests).post(submit_request))
}

#[derive(Deserialize, ToSchema)]
pub struct SupplyRequestBody {
    pub blood_type_id: i64,
    pub quantity: i64,
}

/// GET /hospital/requests
#[utoipa::path(
    get,
    path = "/hospital/requests",
    tag = "Hospital",
    responses(
        (status = 200, description = "Own supply requests, newest first", body = [BloodSupplyRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a hospital or blood bank")
    ),
    security(("session_header" = []))
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<BloodSupplyRequest>>, ApiError> {
    ctx.require(Capability::SubmitSupplyRequest)?;
    let requests = blood_request_service::list_for_requester(&state.pool, ctx.user_id).await?;
    Ok(Json(requests))
}

/// POST /hospital/requests
#[utoipa::path(
    post,
    path = "/hospital/requests",
    tag = "Hospital",
    request_body = SupplyRequestBody,
    responses(
        (status = 200, description = "Pending request created", body = BloodSupplyRequest),
        (status = 400, description = "Invalid quantity"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a hospital or blood bank"),
        (status = 404, description = "Unknown blood type")
    ),
    security(("session_header" = []))
)]
pub async fn submit_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(body): Json<SupplyRequestBody>,
) -> Result<Json<BloodSupplyRequest>, ApiError> {
    ctx.require(Capability::SubmitSupplyRequest)?;
    let today = Utc::now().date_naive();
    let request = blood_request_service::submit(
        &state.pool,
        ctx.user_id,
        body.blood_type_id,
        body.quantity,
        today,
    )
    .await?;
    Ok(Json(request))
}
