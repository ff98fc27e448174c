use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Actor roles. Stored verbatim in the `roles` reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Role {
    Admin,
    Donor,
    Hospital,
    BloodBank,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Donor => "Donor",
            Role::Hospital => "Hospital",
            Role::BloodBank => "BloodBank",
        }
    }

    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "Admin" => Some(Role::Admin),
            "Donor" => Some(Role::Donor),
            "Hospital" => Some(Role::Hospital),
            "BloodBank" => Some(Role::BloodBank),
            _ => None,
        }
    }
}

/// Request lifecycle states. A request leaves `Pending` exactly once;
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(name: &str) -> Option<RequestStatus> {
        match name.trim() {
            "Pending" => Some(RequestStatus::Pending),
            "Approved" => Some(RequestStatus::Approved),
            "Rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
