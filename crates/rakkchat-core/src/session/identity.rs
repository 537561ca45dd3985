//! Session identity manager.
//!
//! Reads the persisted session identifier, generating and persisting a fresh
//! one when absent. Storage failures never surface to callers: they are
//! logged and the manager falls back to an in-memory identifier for the
//! lifetime of this instance.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::storage::SessionStore;

/// Length of the random suffix appended to generated identifiers.
const SUFFIX_LEN: usize = 9;

/// Generate a new session identifier: `session_<unix millis>_<random>`.
///
/// Collisions are negligible for single-profile correlation; this is not a
/// security token.
pub fn generate_session_id() -> String {
    let random = Uuid::now_v7().simple().to_string();
    // v7 puts the timestamp first; the tail is random.
    let suffix = &random[random.len() - SUFFIX_LEN..];
    format!("session_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Owns the session identifier and its persistence.
pub struct SessionIdentity<S: SessionStore> {
    store: S,
    key: String,
    /// Identifier handed out by this instance, kept so a failing store
    /// does not produce a new identifier on every call.
    cached: Option<String>,
}

impl<S: SessionStore> SessionIdentity<S> {
    /// Create a manager persisting under `key`. Performs no I/O.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cached: None,
        }
    }

    /// The identifier this instance has handed out, if any.
    pub fn cached(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    /// Return the persisted identifier, generating and persisting one if
    /// none exists yet.
    pub async fn get_or_create(&mut self) -> String {
        if let Some(id) = &self.cached {
            return id.clone();
        }

        let id = match self.store.get(&self.key).await {
            Ok(Some(id)) if !id.is_empty() => {
                debug!(session_id = %id, "Reusing persisted session id");
                id
            }
            Ok(_) => {
                let id = generate_session_id();
                match self.store.set(&self.key, &id).await {
                    Ok(()) => info!(session_id = %id, "Generated new session id"),
                    Err(e) => warn!(error = %e, "Failed to persist session id; using it for this load only"),
                }
                id
            }
            Err(e) => {
                let id = generate_session_id();
                warn!(error = %e, session_id = %id, "Session store unreadable; using a fresh session id");
                id
            }
        };

        self.cached = Some(id.clone());
        id
    }

    /// The identifier currently persisted, without generating one.
    ///
    /// A store read failure is logged and reported as `None`.
    pub async fn persisted(&self) -> Option<String> {
        match self.store.get(&self.key).await {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session id");
                None
            }
        }
    }

    /// Forget the identifier, both persisted and cached. The next
    /// [`get_or_create`](Self::get_or_create) yields a new value.
    pub async fn clear(&mut self) {
        self.cached = None;
        if let Err(e) = self.store.remove(&self.key).await {
            warn!(error = %e, "Failed to remove persisted session id");
        }
    }
}
