//! In-memory session store.
//!
//! Sessions are issued at login and carry the verified identity that every
//! workflow call trusts. The store is process-local; credential checks
//! themselves belong to the external authentication provider.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Role;

const SESSION_TTL_HOURS: i64 = 12;

/// Identity attached to an authenticated session.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Shared in-memory session store keyed by session token.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new session for an authenticated identity.
    pub async fn create(&self, user_id: i64, role: Role) -> Uuid {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let session = Session {
            user_id,
            role,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        };
        self.inner.write().await.insert(session_id, session);
        session_id
    }

    /// Look up a live session. Expired sessions are dropped on access.
    pub async fn get(&self, session_id: Uuid) -> Option<Session> {
        let store = self.inner.read().await;
        match store.get(&session_id) {
            Some(s) if s.expires_at > Utc::now() => Some(s.clone()),
            Some(_) => {
                drop(store);
                self.inner.write().await.remove(&session_id);
                None
            }
            None => None,
        }
    }

    /// Revoke a session (logout).
    pub async fn revoke(&self, session_id: Uuid) -> bool {
        self.inner.write().await.remove(&session_id).is_some()
    }
}
