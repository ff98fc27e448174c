use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User account row. Credential material is an opaque string owned by the
/// external identity provider.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub full_name: Option<String>,
    pub email: String,
    pub mobile_no: Option<String>,
    pub address: Option<String>,
    pub role_id: i64,
}
