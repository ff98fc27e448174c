//! Startup seeding.
//!
//! Reference data (roles, blood types, zeroed inventory rows) ships in the
//! migrations; this service only bootstraps the admin account from the
//! environment when one is not already present.

use sqlx::SqlitePool;
use tracing::info;

use crate::storage::StorageError;

pub struct SeedService;

impl SeedService {
    /// Create the admin account if no user with `email` exists.
    pub async fn seed_admin(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<(), StorageError> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT user_id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        if existing.is_some() {
            info!("Admin account already present, skipping seed");
            return Ok(());
        }

        let role_id: i64 =
            sqlx::query_scalar("SELECT role_id FROM roles WHERE role_name = 'Admin'")
                .fetch_one(pool)
                .await?;

        sqlx::query(
            "INSERT INTO users (user_name, full_name, email, password_hash, role_id) \
             VALUES ('admin', 'Administrator', ?, ?, ?)",
        )
        .bind(email)
        .bind(password)
        .bind(role_id)
        .execute(pool)
        .await?;

        info!(email, "Seeded admin account");
        Ok(())
    }
}
