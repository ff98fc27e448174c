//! Storage error types for the API storage backend.

use thiserror::Error;

/// Storage operation errors. Not-found outcomes are domain results, not
/// storage failures; they surface as `WorkflowError::NotFound`.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::ConnectionError(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StorageError::Other(format!("Migration failed: {e}"))
    }
}
