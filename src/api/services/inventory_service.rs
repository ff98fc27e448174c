//! Inventory ledger: the per-blood-type unit counter and its guarded
//! mutation operations.
//!
//! All operations take `&mut SqliteConnection` so they compose into the
//! workflow transactions. The conditional decrement is a single guarded
//! UPDATE, so two concurrent approvals can never both pass the stock check
//! and drive the counter negative.

use sqlx::SqliteConnection;

use super::error::WorkflowError;
use crate::models::InventoryLevel;

/// Current stock for a blood type.
pub async fn units(conn: &mut SqliteConnection, blood_type_id: i64) -> Result<i64, WorkflowError> {
    let row: Option<i64> =
        sqlx::query_scalar("SELECT units_available FROM blood_inventory WHERE blood_type_id = ?")
            .bind(blood_type_id)
            .fetch_optional(&mut *conn)
            .await?;

    row.ok_or(WorkflowError::NotFound {
        entity: "Inventory record",
    })
}

/// Unconditional increase of `amount` units.
pub async fn credit(
    conn: &mut SqliteConnection,
    blood_type_id: i64,
    amount: i64,
) -> Result<(), WorkflowError> {
    if amount <= 0 {
        return Err(WorkflowError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let affected = sqlx::query(
        "UPDATE blood_inventory SET units_available = units_available + ? WHERE blood_type_id = ?",
    )
    .bind(amount)
    .bind(blood_type_id)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(WorkflowError::NotFound {
            entity: "Inventory record",
        });
    }
    Ok(())
}

/// Decrement `amount` units only if sufficient stock is available.
///
/// Check-then-act as one statement: the `units_available >= ?` guard and the
/// decrement execute atomically inside the caller's transaction. On failure
/// the counter is left unchanged and the shortfall is reported.
pub async fn debit(
    conn: &mut SqliteConnection,
    blood_type_id: i64,
    amount: i64,
) -> Result<(), WorkflowError> {
    if amount <= 0 {
        return Err(WorkflowError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let affected = sqlx::query(
        "UPDATE blood_inventory \
         SET units_available = units_available - ? \
         WHERE blood_type_id = ? AND units_available >= ?",
    )
    .bind(amount)
    .bind(blood_type_id)
    .bind(amount)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if affected == 1 {
        return Ok(());
    }

    // Zero rows: either the record is missing or stock is short.
    let available = units(conn, blood_type_id).await?;
    Err(WorkflowError::InsufficientStock {
        available,
        requested: amount,
    })
}

/// Set the counter to an absolute value.
pub async fn set_units(
    conn: &mut SqliteConnection,
    blood_type_id: i64,
    value: i64,
) -> Result<(), WorkflowError> {
    if value < 0 {
        return Err(WorkflowError::InvalidInput(
            "Units must be zero or greater".to_string(),
        ));
    }

    let affected =
        sqlx::query("UPDATE blood_inventory SET units_available = ? WHERE blood_type_id = ?")
            .bind(value)
            .bind(blood_type_id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

    if affected == 0 {
        return Err(WorkflowError::NotFound {
            entity: "Inventory record",
        });
    }
    Ok(())
}

/// Signed adjustment; negative deltas carry the same non-negativity guard
/// as [`debit`]. A zero delta is a no-op.
pub async fn adjust(
    conn: &mut SqliteConnection,
    blood_type_id: i64,
    delta: i64,
) -> Result<(), WorkflowError> {
    match delta.cmp(&0) {
        std::cmp::Ordering::Greater => credit(conn, blood_type_id, delta).await,
        std::cmp::Ordering::Less => debit(conn, blood_type_id, -delta).await,
        std::cmp::Ordering::Equal => Ok(()),
    }
}

/// All stock levels with blood type names, ordered by type name.
pub async fn levels(conn: &mut SqliteConnection) -> Result<Vec<InventoryLevel>, WorkflowError> {
    let rows = sqlx::query_as::<_, InventoryLevel>(
        "SELECT i.blood_type_id, bt.type_name, i.units_available \
         FROM blood_inventory i \
         JOIN blood_types bt ON bt.blood_type_id = i.blood_type_id \
         ORDER BY bt.type_name",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}
