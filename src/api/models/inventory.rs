use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-blood-type unit counter. Invariant: `units_available >= 0` at all
/// times, including across concurrent adjustments.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct InventoryRecord {
    pub id: i64,
    pub blood_type_id: i64,
    pub units_available: i64,
}

/// Inventory row joined with its blood type name, for presentation.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct InventoryLevel {
    pub blood_type_id: i64,
    pub type_name: String,
    pub units_available: i64,
}
