//! Inventory routes: stock levels for every authenticated role, and the
//! admin-only stock adjustment endpoints.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::app_state::AppState;
use super::auth_context::{AuthContext, Capability};
use super::error::{ApiError, ApiMessage};
use crate::models::InventoryLevel;
use crate::services::inventory_service;

pub fn inventory_router() -> Router<AppState> {
    Router::new().route("/", get(list_levels))
}

/// Mounted under /admin/inventory.
pub fn admin_inventory_router() -> Router<AppState> {
    Router::new()
        .route("/{blood_type_id}", put(set_units))
        .route("/{blood_type_id}/add", post(add_units))
        .route("/{blood_type_id}/remove", post(remove_units))
}

#[derive(Deserialize, ToSchema)]
pub struct SetUnitsBody {
    pub units: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct AmountBody {
    pub amount: i64,
}

/// GET /inventory
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Stock levels per blood type", body = [InventoryLevel]),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_header" = []))
)]
pub async fn list_levels(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<InventoryLevel>>, ApiError> {
    ctx.require(Capability::ViewInventory)?;
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(crate::services::WorkflowError::from)?;
    let levels = inventory_service::levels(&mut conn).await?;
    Ok(Json(levels))
}

/// PUT /admin/inventory/{blood_type_id}
#[utoipa::path(
    put,
    path = "/admin/inventory/{blood_type_id}",
    tag = "Admin",
    params(("blood_type_id" = i64, Path, description = "Blood type id")),
    request_body = SetUnitsBody,
    responses(
        (status = 200, description = "Units set", body = ApiMessage),
        (status = 400, description = "Negative value"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Inventory record not found")
    ),
    security(("session_header" = []))
)]
pub async fn set_units(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(blood_type_id): Path<i64>,
    Json(body): Json<SetUnitsBody>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ManageInventory)?;
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(crate::services::WorkflowError::from)?;
    inventory_service::set_units(&mut conn, blood_type_id, body.units).await?;
    Ok(ApiMessage::ok("Units updated successfully"))
}

/// POST /admin/inventory/{blood_type_id}/add
#[utoipa::path(
    post,
    path = "/admin/inventory/{blood_type_id}/add",
    tag = "Admin",
    params(("blood_type_id" = i64, Path, description = "Blood type id")),
    request_body = AmountBody,
    responses(
        (status = 200, description = "Units added", body = ApiMessage),
        (status = 400, description = "Non-positive amount"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Inventory record not found")
    ),
    security(("session_header" = []))
)]
pub async fn add_units(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(blood_type_id): Path<i64>,
    Json(body): Json<AmountBody>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ManageInventory)?;
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(crate::services::WorkflowError::from)?;
    inventory_service::credit(&mut conn, blood_type_id, body.amount).await?;
    Ok(ApiMessage::ok(format!("+{} units added", body.amount)))
}

/// POST /admin/inventory/{blood_type_id}/remove
#[utoipa::path(
    post,
    path = "/admin/inventory/{blood_type_id}/remove",
    tag = "Admin",
    params(("blood_type_id" = i64, Path, description = "Blood type id")),
    request_body = AmountBody,
    responses(
        (status = 200, description = "Units removed", body = ApiMessage),
        (status = 400, description = "Non-positive amount"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Inventory record not found"),
        (status = 409, description = "Not enough units to remove")
    ),
    security(("session_header" = []))
)]
pub async fn remove_units(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(blood_type_id): Path<i64>,
    Json(body): Json<AmountBody>,
) -> Result<Json<ApiMessage>, ApiError> {
    ctx.require(Capability::ManageInventory)?;
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(crate::services::WorkflowError::from)?;
    inventory_service::debit(&mut conn, blood_type_id, body.amount).await?;
    Ok(ApiMessage::ok(format!("-{} units removed", body.amount)))
}
