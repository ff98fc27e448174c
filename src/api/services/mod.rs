//! Services module - workflow engines and business rules.

pub mod auth_service;
pub mod blood_request_service;
pub mod donation_service;
pub mod eligibility;
pub mod error;
pub mod inventory_service;
pub mod seed_service;
pub mod stats_service;
pub mod verification_service;

pub use auth_service::{AuthProvider, Identity, StoreAuthProvider};
pub use eligibility::IneligibleReason;
pub use error::WorkflowError;
pub use seed_service::SeedService;
