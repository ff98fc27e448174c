//! API routes module - organizes all route handlers.

pub mod admin;
pub mod app_state;
pub mod auth;
pub mod auth_context;
pub mod donor;
pub mod error;
pub mod hospital;
pub mod inventory;
pub mod openapi;

use axum::Router;

pub use app_state::AppState;
pub use auth_context::{AuthContext, Capability};

/// Create the main API router combining all route modules.
///
/// State is applied by callers (e.g. `.with_state(app_state)` in the binary
/// or the test server).
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_router())
        .nest("/donor", donor::donor_router())
        .nest("/hospital", hospital::hospital_router())
        .nest("/inventory", inventory::inventory_router())
        .nest(
            "/admin",
            admin::admin_router().nest("/inventory", inventory::admin_inventory_router()),
        )
        .merge(openapi::openapi_router())
}
