// Storage module - SQLite pool setup, storage errors, session store

pub mod error;
pub mod session_store;
pub mod sqlite;

pub use error::StorageError;
pub use session_store::{Session, SessionStore};
