//! Blood supply request workflow: Pending -> {Approved, Rejected}.
//!
//! Approval claims the Pending row first and then debits the ledger inside
//! the same transaction. A failed debit aborts the transaction, so the claim
//! rolls back and the request stays Pending with no partial state visible.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use super::error::WorkflowError;
use super::inventory_service;
use crate::models::{BloodSupplyRequest, BloodSupplyRequestRow, RequestStatus};

const REQUEST_COLUMNS: &str = "id, user_id, blood_type_id, quantity, request_date, status";

/// Submit a supply request for `quantity` units of `blood_type_id`.
/// Institutional requesters carry no cooldown.
pub async fn submit(
    pool: &SqlitePool,
    requester_user_id: i64,
    blood_type_id: i64,
    quantity: i64,
    as_of: NaiveDate,
) -> Result<BloodSupplyRequest, WorkflowError> {
    if quantity <= 0 {
        return Err(WorkflowError::InvalidInput(
            "Quantity must be a positive number of units".to_string(),
        ));
    }

    let mut conn = pool.acquire().await?;

    let known: Option<i64> =
        sqlx::query_scalar("SELECT blood_type_id FROM blood_types WHERE blood_type_id = ?")
            .bind(blood_type_id)
            .fetch_optional(&mut *conn)
            .await?;
    if known.is_none() {
        return Err(WorkflowError::NotFound {
            entity: "Blood type",
        });
    }

    let result = sqlx::query(
        "INSERT INTO blood_requests (user_id, blood_type_id, quantity, request_date, status) \
         VALUES (?, ?, ?, ?, 'Pending')",
    )
    .bind(requester_user_id)
    .bind(blood_type_id)
    .bind(quantity)
    .bind(as_of)
    .execute(&mut *conn)
    .await?;

    let request = sqlx::query_as::<_, BloodSupplyRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = ?"
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(
        user_id = requester_user_id,
        request_id = request.id,
        quantity,
        "blood supply request submitted"
    );
    Ok(request)
}

/// Approve a pending supply request, debiting the inventory by its quantity.
pub async fn approve(
    pool: &SqlitePool,
    request_id: i64,
    admin_id: i64,
) -> Result<(), WorkflowError> {
    let mut conn = pool.acquire().await?;

    // IMMEDIATE takes the write lock up front, so racing deciders on
    // separate connections queue on the busy timeout instead of failing
    // mid-transaction; the loser then sees the terminal status.
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
    match apply_approval(&mut conn, request_id).await {
        Ok(quantity) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            tracing::info!(request_id, admin_id, quantity, "blood request approved");
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
) -> Result<i64, WorkflowError> {
    let request = sqlx::query_as::<_, BloodSupplyRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = ?"
    ))
    .bind(request_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(WorkflowError::NotFound {
        entity: "Blood request",
    })?;

    if request.status.is_terminal() {
        return Err(WorkflowError::AlreadyProcessed);
    }
    if request.quantity <= 0 {
        return Err(WorkflowError::InvalidInput(
            "Request has an invalid quantity".to_string(),
        ));
    }

    // Claim the row before the debit; exactly one concurrent decider wins.
    let claimed = sqlx::query(
        "UPDATE blood_requests SET status = 'Approved' WHERE id = ? AND status = 'Pending'",
    )
    .bind(request_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    if claimed == 0 {
        return Err(WorkflowError::AlreadyProcessed);
    }

    // On InsufficientStock the transaction rolls back and the claim with it.
    inventory_service::debit(&mut *conn, request.blood_type_id, request.quantity).await?;

    Ok(request.quantity)
}

/// Reject a pending supply request. No inventory effect.
pub async fn reject(
    pool: &SqlitePool,
    request_id: i64,
    admin_id: i64,
) -> Result<(), WorkflowError> {
    let mut conn = pool.acquire().await?;

    let status: Option<RequestStatus> =
        sqlx::query_scalar("SELECT status FROM blood_requests WHERE id = ?")
            .bind(request_id)
            .fetch_optional(&mut *conn)
            .await?;
    let status = status.ok_or(WorkflowError::NotFound {
        entity: "Blood request",
    })?;
    if status.is_terminal() {
        return Err(WorkflowError::AlreadyProcessed);
    }

    let claimed = sqlx::query(
        "UPDATE blood_requests SET status = 'Rejected' WHERE id = ? AND status = 'Pending'",
    )
    .bind(request_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    if claimed == 0 {
        return Err(WorkflowError::AlreadyProcessed);
    }

    tracing::info!(request_id, admin_id, "blood request rejected");
    Ok(())
}

/// A requester's own supply requests, newest first.
pub async fn list_for_requester(
    pool: &SqlitePool,
    requester_user_id: i64,
) -> Result<Vec<BloodSupplyRequest>, WorkflowError> {
    let rows = sqlx::query_as::<_, BloodSupplyRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE user_id = ? ORDER BY id DESC"
    ))
    .bind(requester_user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

const ROW_SELECT: &str = "SELECT br.id, br.user_id, u.full_name AS user_name, br.blood_type_id, \
     bt.type_name, br.quantity, br.request_date, br.status \
     FROM blood_requests br \
     LEFT JOIN users u ON u.user_id = br.user_id \
     LEFT JOIN blood_types bt ON bt.blood_type_id = br.blood_type_id";

/// Admin-side listing joined with requester and blood type names,
/// optionally filtered by status, newest first.
pub async fn list_by_status(
    pool: &SqlitePool,
    status: Option<RequestStatus>,
) -> Result<Vec<BloodSupplyRequestRow>, WorkflowError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, BloodSupplyRequestRow>(&format!(
                "{ROW_SELECT} WHERE br.status = ? ORDER BY br.id DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, BloodSupplyRequestRow>(&format!("{ROW_SELECT} ORDER BY br.id DESC"))
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows)
}
