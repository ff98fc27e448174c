//! Authentication context and capability checks.
//!
//! Identity is extracted from the session header and passed explicitly into
//! every workflow call; handlers never read ambient state. Authorization is
//! a single capability predicate rather than ad-hoc role comparisons.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use super::app_state::AppState;
use super::error::ApiError;
use crate::models::Role;

/// What a caller is allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Decide donation and supply requests.
    ApproveRequests,
    /// Set/add/remove inventory stock.
    ManageInventory,
    /// Mark donor health data as verified.
    VerifyDonors,
    /// View dashboard statistics.
    ViewStatistics,
    /// Submit a request to donate.
    SubmitDonationRequest,
    /// Submit a request for blood units.
    SubmitSupplyRequest,
    /// Read stock levels.
    ViewInventory,
}

impl Capability {
    /// The single authorization predicate applied before workflow entry.
    pub fn granted_to(self, role: Role) -> bool {
        match self {
            Capability::ApproveRequests
            | Capability::ManageInventory
            | Capability::VerifyDonors
            | Capability::ViewStatistics => role == Role::Admin,
            Capability::SubmitDonationRequest => role == Role::Donor,
            Capability::SubmitSupplyRequest => {
                matches!(role, Role::Hospital | Role::BloodBank)
            }
            Capability::ViewInventory => true,
        }
    }
}

/// Authentication context extracted from the request.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: Role,
    pub session_id: Uuid,
}

impl AuthContext {
    /// Fail with 403 unless the caller's role grants `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), ApiError> {
        if capability.granted_to(self.role) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = self.user_id,
                role = self.role.as_str(),
                ?capability,
                "capability denied"
            );
            Err(ApiError::forbidden())
        }
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-session-id")
            .and_then(|h| h.to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get("authorization")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
            })
            .ok_or_else(|| ApiError::unauthorized("No session token provided"))?;

        let session_id = Uuid::parse_str(token)
            .map_err(|_| ApiError::unauthorized("Malformed session token"))?;

        let session = state
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| ApiError::unauthorized("Session expired or unknown"))?;

        Ok(AuthContext {
            user_id: session.user_id,
            role: session.role,
            session_id,
        })
    }
}
