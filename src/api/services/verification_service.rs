//! Medical verification gate.
//!
//! Marks a donor's health data as verified, a precondition for donation
//! approval. One-way: re-verifying simply re-stamps the verifier and date;
//! no unverify path exists.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::error::WorkflowError;

/// Mark the donor owned by `donor_user_id` as medically verified.
pub async fn verify(
    pool: &SqlitePool,
    donor_user_id: i64,
    admin_id: i64,
    as_of: NaiveDate,
) -> Result<(), WorkflowError> {
    let affected = sqlx::query(
        "UPDATE donors \
         SET is_medical_verified = 1, medical_verified_by = ?, medical_verified_date = ? \
         WHERE user_id = ?",
    )
    .bind(admin_id)
    .bind(as_of)
    .bind(donor_user_id)
    .execute(pool)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(WorkflowError::NotFound {
            entity: "Donor profile",
        });
    }

    tracing::info!(donor_user_id, admin_id, "donor medical data verified");
    Ok(())
}
