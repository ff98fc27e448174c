//! API error handling utilities.
//!
//! Domain failures surface as structured JSON with a specific, actionable
//! message; infrastructure failures are logged and reported generically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::services::WorkflowError;
use crate::storage::StorageError;

/// API error response
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub kind: &'static str,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
            kind: "UNAUTHORIZED",
        }
    }

    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "Not authorized".to_string(),
            kind: "FORBIDDEN",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            kind: "INVALID_INPUT",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "message": self.message,
            "error": self.kind,
        });

        (self.status, axum::Json(body)).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        let kind = e.kind();
        let status = match &e {
            WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
            WorkflowError::AlreadyProcessed
            | WorkflowError::AlreadyPending
            | WorkflowError::InsufficientStock { .. } => StatusCode::CONFLICT,
            WorkflowError::CooldownActive { .. } | WorkflowError::Ineligible(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            WorkflowError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Storage(err) => {
                tracing::error!("storage failure: {err}");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Something went wrong. Please try again.".to_string(),
                    kind,
                };
            }
        };

        Self {
            status,
            message: e.to_string(),
            kind,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        WorkflowError::Storage(e).into()
    }
}

/// Success envelope for operations with no payload.
#[derive(Serialize, ToSchema)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> axum::Json<ApiMessage> {
        axum::Json(ApiMessage {
            success: true,
            message: message.into(),
        })
    }
}
