//! Workflow error taxonomy.
//!
//! Every variant here is an expected, recoverable outcome reported to the
//! caller as a structured result. Only `Storage` wraps true infrastructure
//! failures; the triggering transaction rolls back wholly when one occurs.

use chrono::NaiveDate;
use thiserror::Error;

use super::eligibility::IneligibleReason;
use crate::storage::StorageError;

/// Domain-level failures of the workflow operations.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Referenced request, donor, blood type, or inventory row does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Request already left the Pending state; the retry is rejected, not
    /// silently accepted.
    #[error("Already processed")]
    AlreadyProcessed,

    /// Donor attempted to submit a second concurrent donation request.
    #[error("You already have a pending donation request")]
    AlreadyPending,

    /// Donation request blocked by the 3-month rule.
    #[error("You can request again after {}", .resume_date.format("%d/%m/%Y"))]
    CooldownActive { resume_date: NaiveDate },

    /// Eligibility gate failed at approval time.
    #[error(transparent)]
    Ineligible(#[from] IneligibleReason),

    /// Supply-request approval exceeds available inventory.
    #[error("Not enough blood units available: {available} on hand, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// Non-positive quantity, missing blood type, unknown status filter, etc.
    #[error("{0}")]
    InvalidInput(String),

    /// Infrastructure failure (store unreachable, query failed).
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WorkflowError {
    /// Stable machine-readable tag for the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::NotFound { .. } => "NOT_FOUND",
            WorkflowError::AlreadyProcessed => "ALREADY_PROCESSED",
            WorkflowError::AlreadyPending => "ALREADY_PENDING",
            WorkflowError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            WorkflowError::Ineligible(_) => "INELIGIBLE",
            WorkflowError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            WorkflowError::InvalidInput(_) => "INVALID_INPUT",
            WorkflowError::Storage(_) => "STORAGE",
        }
    }
}

impl From<sqlx::Error> for WorkflowError {
    fn from(e: sqlx::Error) -> Self {
        WorkflowError::Storage(StorageError::from(e))
    }
}
