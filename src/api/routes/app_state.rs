//! Application state shared across all route handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::{AuthProvider, StoreAuthProvider};
use crate::storage::SessionStore;

/// Shared state: database pool, session store, and the authentication
/// provider seam.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionStore,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// State with the store-backed authentication provider.
    pub fn new(pool: SqlitePool) -> Self {
        let auth: Arc<dyn AuthProvider> = Arc::new(StoreAuthProvider::new(pool.clone()));
        Self {
            pool,
            sessions: SessionStore::new(),
            auth,
        }
    }

    /// State with a custom authentication provider.
    pub fn with_auth_provider(pool: SqlitePool, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            pool,
            sessions: SessionStore::new(),
            auth,
        }
    }
}
