//! OpenAPI specification definition.
//!
//! Aggregates all route handlers and schemas for documentation generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Authentication
        crate::api::routes::auth::login,
        crate::api::routes::auth::logout,
        // Donor
        crate::api::routes::donor::get_profile,
        crate::api::routes::donor::list_my_requests,
        crate::api::routes::donor::submit_request,
        // Hospital / blood bank
        crate::api::routes::hospital::list_my_requests,
        crate::api::routes::hospital::submit_request,
        // Inventory
        crate::api::routes::inventory::list_levels,
        crate::api::routes::inventory::set_units,
        crate::api::routes::inventory::add_units,
        crate::api::routes::inventory::remove_units,
        // Admin workflows
        crate::api::routes::admin::list_donation_requests,
        crate::api::routes::admin::approve_donation_request,
        crate::api::routes::admin::reject_donation_request,
        crate::api::routes::admin::list_blood_requests,
        crate::api::routes::admin::approve_blood_request,
        crate::api::routes::admin::reject_blood_request,
        crate::api::routes::admin::list_donations,
        crate::api::routes::admin::verify_donor_medical,
        crate::api::routes::admin::statistics,
    ),
    components(schemas(
        crate::api::models::enums::Role,
        crate::api::models::enums::RequestStatus,
        crate::api::models::BloodType,
        crate::api::models::Donor,
        crate::api::models::Donation,
        crate::api::models::DonationRow,
        crate::api::models::DonationRequest,
        crate::api::models::BloodSupplyRequest,
        crate::api::models::BloodSupplyRequestRow,
        crate::api::models::InventoryRecord,
        crate::api::models::InventoryLevel,
        crate::api::routes::auth::LoginRequest,
        crate::api::routes::auth::LoginResponse,
        crate::api::routes::donor::DonorProfileResponse,
        crate::api::routes::hospital::SupplyRequestBody,
        crate::api::routes::inventory::SetUnitsBody,
        crate::api::routes::inventory::AmountBody,
        crate::api::routes::error::ApiMessage,
        crate::api::services::stats_service::Statistics,
        crate::api::services::stats_service::StatusCounts,
        crate::api::services::stats_service::BloodTypeCount,
    )),
    modifiers(&SessionSecurity),
    tags(
        (name = "Auth", description = "Session authentication"),
        (name = "Donor", description = "Donor profile and donation requests"),
        (name = "Hospital", description = "Blood supply requests"),
        (name = "Inventory", description = "Stock levels"),
        (name = "Admin", description = "Approval workflows and administration"),
    ),
    info(
        title = "Blood Donation API",
        description = "Role-based API for coordinating blood donation logistics"
    )
)]
pub struct ApiDoc;

/// Registers the `x-session-id` header scheme referenced by the handlers.
pub struct SessionSecurity;

impl Modify for SessionSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_header",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-session-id"))),
            );
        }
    }
}
