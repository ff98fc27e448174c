//! Read-only statistics for the admin dashboard.

use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use super::error::WorkflowError;

/// Counts of rows per lifecycle state.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// Donor head-count per blood type.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct BloodTypeCount {
    pub type_name: String,
    pub donors: i64,
}

/// Aggregate dashboard figures.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Statistics {
    pub donations: StatusCounts,
    pub donation_requests: StatusCounts,
    pub supply_requests: StatusCounts,
    pub donors_by_blood_type: Vec<BloodTypeCount>,
}

async fn status_counts(pool: &SqlitePool, table: &str) -> Result<StatusCounts, WorkflowError> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as(&format!("SELECT status, COUNT(*) FROM {table} GROUP BY status"))
            .fetch_all(pool)
            .await?;

    let mut counts = StatusCounts::default();
    for (status, count) in rows {
        match status.as_str() {
            "Pending" => counts.pending = count,
            "Approved" => counts.approved = count,
            "Rejected" => counts.rejected = count,
            _ => {}
        }
    }
    Ok(counts)
}

/// Gather all dashboard statistics.
pub async fn statistics(pool: &SqlitePool) -> Result<Statistics, WorkflowError> {
    let donations = status_counts(pool, "donations").await?;
    let donation_requests = status_counts(pool, "donation_requests").await?;
    let supply_requests = status_counts(pool, "blood_requests").await?;

    let donors_by_blood_type = sqlx::query_as::<_, BloodTypeCount>(
        "SELECT bt.type_name, COUNT(*) AS donors \
         FROM donors d \
         JOIN blood_types bt ON bt.blood_type_id = d.blood_type_id \
         GROUP BY bt.type_name \
         ORDER BY bt.type_name",
    )
    .fetch_all(pool)
    .await?;

    Ok(Statistics {
        donations,
        donation_requests,
        supply_requests,
        donors_by_blood_type,
    })
}
