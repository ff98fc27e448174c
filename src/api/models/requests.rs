use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::RequestStatus;

/// A donor's request to donate, pending admin decision.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DonationRequest {
    pub id: i64,
    pub user_id: i64,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
    pub approved_by: Option<i64>,
    pub approved_date: Option<NaiveDate>,
}

/// A hospital's or blood bank's request for units of a given blood type.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct BloodSupplyRequest {
    pub id: i64,
    pub user_id: i64,
    pub blood_type_id: i64,
    pub quantity: i64,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
}

/// Admin-side view of a supply request joined with requester and blood
/// type names.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct BloodSupplyRequestRow {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub blood_type_id: i64,
    pub type_name: Option<String>,
    pub quantity: i64,
    pub request_date: NaiveDate,
    pub status: RequestStatus,
}
