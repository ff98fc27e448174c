// API module for the blood donation coordination backend
pub mod api;

// Re-export api modules at crate root so consumers and tests can use
// crate::services, crate::models, etc.
pub use api::middleware;
pub use api::models;
pub use api::routes;
pub use api::services;
pub use api::storage;
