//! Donation request workflow: Pending -> {Approved, Rejected}.
//!
//! Approval performs four writes as one transaction: the request transition,
//! the donation history row, the inventory credit, and the donor's
//! `last_donation_date`. Partial application of any subset is a consistency
//! violation, so any failure rolls the whole unit back.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use super::error::WorkflowError;
use super::{eligibility, inventory_service};
use crate::models::{Donor, DonationRequest, DonationRow, RequestStatus};

const DONOR_COLUMNS: &str = "id, user_id, blood_type_id, date_of_birth, last_donation_date, \
     is_medical_verified, medical_verified_by, medical_verified_date, health_status";

const REQUEST_COLUMNS: &str = "id, user_id, request_date, status, approved_by, approved_date";

/// Submit a new donation request for `donor_user_id`.
///
/// Rejected when the donor already has a Pending request, or when the most
/// recent request date (regardless of outcome) is within the cooldown
/// window of `as_of`.
pub async fn submit(
    pool: &SqlitePool,
    donor_user_id: i64,
    as_of: NaiveDate,
) -> Result<DonationRequest, WorkflowError> {
    let mut conn = pool.acquire().await?;

    let donor_id: Option<i64> = sqlx::query_scalar("SELECT id FROM donors WHERE user_id = ?")
        .bind(donor_user_id)
        .fetch_optional(&mut *conn)
        .await?;
    if donor_id.is_none() {
        return Err(WorkflowError::NotFound {
            entity: "Donor profile",
        });
    }

    let pending: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM donation_requests WHERE user_id = ? AND status = 'Pending' LIMIT 1",
    )
    .bind(donor_user_id)
    .fetch_optional(&mut *conn)
    .await?;
    if pending.is_some() {
        return Err(WorkflowError::AlreadyPending);
    }

    let last: Option<NaiveDate> =
        sqlx::query_scalar("SELECT MAX(request_date) FROM donation_requests WHERE user_id = ?")
            .bind(donor_user_id)
            .fetch_one(&mut *conn)
            .await?;
    if let Some(resume_date) = last.map(eligibility::next_donation_date) {
        if as_of < resume_date {
            return Err(WorkflowError::CooldownActive { resume_date });
        }
    }

    // The partial unique index on (user_id) WHERE status = 'Pending' closes
    // the gap between the check above and this insert: a racing second
    // submission hits the constraint instead of creating a duplicate.
    let result = match sqlx::query(
        "INSERT INTO donation_requests (user_id, request_date, status) VALUES (?, ?, 'Pending')",
    )
    .bind(donor_user_id)
    .bind(as_of)
    .execute(&mut *conn)
    .await
    {
        Ok(result) => result,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(WorkflowError::AlreadyPending);
        }
        Err(e) => return Err(e.into()),
    };

    let request = sqlx::query_as::<_, DonationRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM donation_requests WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(user_id = donor_user_id, request_id = request.id, "donation request submitted");
    Ok(request)
}

/// Earliest date a new request may be submitted, or `None` when the donor
/// has no prior requests. Keyed off the latest request date regardless of
/// its outcome: a rejected request still starts the clock.
pub async fn next_allowed_request(
    pool: &SqlitePool,
    donor_user_id: i64,
) -> Result<Option<NaiveDate>, WorkflowError> {
    let last: Option<NaiveDate> =
        sqlx::query_scalar("SELECT MAX(request_date) FROM donation_requests WHERE user_id = ?")
            .bind(donor_user_id)
            .fetch_one(pool)
            .await?;

    Ok(last.map(eligibility::next_donation_date))
}

/// Approve a pending donation request.
///
/// Runs the full eligibility rule set against the donor as of `as_of`, then
/// applies the four writes inside one transaction. The status transition is
/// guarded by `status = 'Pending'` so a concurrent decider observes
/// `AlreadyProcessed` instead of double-applying.
pub async fn approve(
    pool: &SqlitePool,
    request_id: i64,
    admin_id: i64,
    as_of: NaiveDate,
) -> Result<(), WorkflowError> {
    let mut conn = pool.acquire().await?;

    // IMMEDIATE takes the write lock up front, so racing deciders on
    // separate connections queue on the busy timeout instead of failing
    // mid-transaction; the loser then sees the terminal status.
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
    match apply_approval(&mut conn, request_id, admin_id, as_of).await {
        Ok(()) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            tracing::info!(request_id, admin_id, "donation request approved");
            Ok(())
        }
        Err(err) => {
            let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
            Err(err)
        }
    }
}

async fn apply_approval(
    conn: &mut SqliteConnection,
    request_id: i64,
    admin_id: i64,
    as_of: NaiveDate,
) -> Result<(), WorkflowError> {
    let request = sqlx::query_as::<_, DonationRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM donation_requests WHERE id = ?"
    ))
    .bind(request_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(WorkflowError::NotFound {
        entity: "Donation request",
    })?;

    if request.status.is_terminal() {
        return Err(WorkflowError::AlreadyProcessed);
    }

    let donor = sqlx::query_as::<_, Donor>(&format!(
        "SELECT {DONOR_COLUMNS} FROM donors WHERE user_id = ?"
    ))
    .bind(request.user_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(WorkflowError::NotFound {
        entity: "Donor profile",
    })?;

    eligibility::evaluate(&donor, as_of)?;

    let blood_type_id = donor.blood_type_id.ok_or_else(|| {
        WorkflowError::InvalidInput("Donor has no blood type on file".to_string())
    })?;

    let claimed = sqlx::query(
        "UPDATE donation_requests \
         SET status = 'Approved', approved_by = ?, approved_date = ? \
         WHERE id = ? AND status = 'Pending'",
    )
    .bind(admin_id)
    .bind(as_of)
    .bind(request_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    if claimed == 0 {
        return Err(WorkflowError::AlreadyProcessed);
    }

    sqlx::query(
        "INSERT INTO donations (user_id, approved_by, donation_date, status) \
         VALUES (?, ?, ?, 'Approved')",
    )
    .bind(request.user_id)
    .bind(admin_id)
    .bind(as_of)
    .execute(&mut *conn)
    .await?;

    inventory_service::credit(&mut *conn, blood_type_id, 1).await?;

    sqlx::query("UPDATE donors SET last_donation_date = ? WHERE user_id = ?")
        .bind(as_of)
        .bind(request.user_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Reject a pending donation request. No inventory effect.
pub async fn reject(
    pool: &SqlitePool,
    request_id: i64,
    admin_id: i64,
    as_of: NaiveDate,
) -> Result<(), WorkflowError> {
    let mut conn = pool.acquire().await?;

    let status: Option<RequestStatus> =
        sqlx::query_scalar("SELECT status FROM donation_requests WHERE id = ?")
            .bind(request_id)
            .fetch_optional(&mut *conn)
            .await?;
    let status = status.ok_or(WorkflowError::NotFound {
        entity: "Donation request",
    })?;
    if status.is_terminal() {
        return Err(WorkflowError::AlreadyProcessed);
    }

    let claimed = sqlx::query(
        "UPDATE donation_requests \
         SET status = 'Rejected', approved_by = ?, approved_date = ? \
         WHERE id = ? AND status = 'Pending'",
    )
    .bind(admin_id)
    .bind(as_of)
    .bind(request_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    if claimed == 0 {
        return Err(WorkflowError::AlreadyProcessed);
    }

    tracing::info!(request_id, admin_id, "donation request rejected");
    Ok(())
}

/// A donor's own request history, newest first.
pub async fn list_for_donor(
    pool: &SqlitePool,
    donor_user_id: i64,
) -> Result<Vec<DonationRequest>, WorkflowError> {
    let rows = sqlx::query_as::<_, DonationRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM donation_requests WHERE user_id = ? ORDER BY id DESC"
    ))
    .bind(donor_user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Admin-side listing, optionally filtered by status, newest first.
pub async fn list_by_status(
    pool: &SqlitePool,
    status: Option<RequestStatus>,
) -> Result<Vec<DonationRequest>, WorkflowError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, DonationRequest>(&format!(
                "SELECT {REQUEST_COLUMNS} FROM donation_requests WHERE status = ? ORDER BY id DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DonationRequest>(&format!(
                "SELECT {REQUEST_COLUMNS} FROM donation_requests ORDER BY id DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Donation history joined with donor names, newest first.
pub async fn list_donations(pool: &SqlitePool) -> Result<Vec<DonationRow>, WorkflowError> {
    let rows = sqlx::query_as::<_, DonationRow>(
        "SELECT d.id, d.user_id, u.full_name AS user_name, bt.type_name, \
                d.donation_date, d.status \
         FROM donations d \
         LEFT JOIN users u ON u.user_id = d.user_id \
         LEFT JOIN donors dn ON dn.user_id = d.user_id \
         LEFT JOIN blood_types bt ON bt.blood_type_id = dn.blood_type_id \
         ORDER BY d.id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch the donor profile for a user.
pub async fn donor_profile(
    pool: &SqlitePool,
    donor_user_id: i64,
) -> Result<Donor, WorkflowError> {
    sqlx::query_as::<_, Donor>(&format!(
        "SELECT {DONOR_COLUMNS} FROM donors WHERE user_id = ?"
    ))
    .bind(donor_user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(WorkflowError::NotFound {
        entity: "Donor profile",
    })
}
