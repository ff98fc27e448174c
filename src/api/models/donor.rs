use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Donor profile, owned 1:1 by a user account.
///
/// `last_donation_date` is updated only by donation-request approval.
/// `is_medical_verified` transitions false -> true only via the medical
/// verification gate (one-way).
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Donor {
    pub id: i64,
    pub user_id: i64,
    pub blood_type_id: Option<i64>,
    pub date_of_birth: Option<NaiveDate>,
    pub last_donation_date: Option<NaiveDate>,
    pub is_medical_verified: bool,
    pub medical_verified_by: Option<i64>,
    pub medical_verified_date: Option<NaiveDate>,
    pub health_status: Option<String>,
}
