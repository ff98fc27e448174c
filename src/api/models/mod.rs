// Models module - domain entities and shared enums

pub mod blood_type;
pub mod donation;
pub mod donor;
pub mod enums;
pub mod inventory;
pub mod requests;
pub mod user;

pub use blood_type::BloodType;
pub use donation::{Donation, DonationRow};
pub use donor::Donor;
pub use enums::{RequestStatus, Role};
pub use inventory::{InventoryLevel, InventoryRecord};
pub use requests::{BloodSupplyRequest, BloodSupplyRequestRow, DonationRequest};
pub use user::User;
