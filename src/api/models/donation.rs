use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::RequestStatus;

/// Historical record of a credited unit event, created as a side effect of
/// donation-request approval. Kept separate from the request row so history
/// survives request bookkeeping changes.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Donation {
    pub id: i64,
    pub user_id: i64,
    pub approved_by: Option<i64>,
    pub donation_date: Option<NaiveDate>,
    pub status: RequestStatus,
}

/// Admin-side view of a donation joined with the donor's name and blood
/// type.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DonationRow {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub type_name: Option<String>,
    pub donation_date: Option<NaiveDate>,
    pub status: RequestStatus,
}
