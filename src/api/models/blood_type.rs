use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Immutable reference data, created at seed time (e.g. "O+").
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct BloodType {
    pub blood_type_id: i64,
    pub type_name: String,
}
