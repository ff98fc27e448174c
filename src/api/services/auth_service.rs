//! Authentication provider seam.
//!
//! Credential issuance and verification are external to this core; the
//! workflows trust the identity a provider hands back. The bundled
//! store-backed provider compares opaque credential strings against the
//! `users` table — hashing and rotation belong to the deployment's identity
//! system, not to this crate.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::Role;
use crate::storage::StorageError;

/// Verified identity returned by a provider.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

/// Opaque authentication seam: `authenticate(email, password)` yields an
/// identity or nothing. No error detail distinguishes unknown accounts from
/// bad credentials.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Identity>, StorageError>;
}

/// Provider backed by the application store.
pub struct StoreAuthProvider {
    pool: SqlitePool,
}

impl StoreAuthProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthProvider for StoreAuthProvider {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Identity>, StorageError> {
        let row: Option<(i64, String, String)> = sqlx::query_as(
            "SELECT u.user_id, u.password_hash, r.role_name \
             FROM users u \
             JOIN roles r ON r.role_id = u.role_id \
             WHERE u.email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some((user_id, stored, role_name)) = row else {
            return Ok(None);
        };

        if stored != password {
            return Ok(None);
        }

        let Some(role) = Role::parse(&role_name) else {
            return Err(StorageError::Other(format!(
                "Unknown role '{role_name}' for user {user_id}"
            )));
        };

        Ok(Some(Identity { user_id, role }))
    }
}
