//! Session authentication routes.
//!
//! Credential verification is delegated to the [`AuthProvider`] seam; a
//! successful login issues a session token the other routes authenticate
//! with via the `x-session-id` header.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::{ApiError, ApiMessage};
use crate::models::Role;
use crate::services::AuthProvider;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub session_id: Uuid,
    pub user_id: i64,
    pub role: Role,
}

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let identity = state
        .auth
        .authenticate(&body.email, &body.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let session_id = state.sessions.create(identity.user_id, identity.role).await;

    info!(user_id = identity.user_id, role = identity.role.as_str(), "login");
    Ok(Json(LoginResponse {
        session_id,
        user_id: identity.user_id,
        role: identity.role,
    }))
}

/// POST /auth/logout
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session revoked", body = ApiMessage),
        (status = 401, description = "Unauthorized")
    ),
    security(("session_header" = []))
)]
pub async fn logout(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiMessage>, ApiError> {
    state.sessions.revoke(ctx.session_id).await;
    info!(user_id = ctx.user_id, "logout");
    Ok(ApiMessage::ok("Logged out"))
}
