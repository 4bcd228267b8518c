//! In-memory session registry for concurrent transports.
//!
//! The map itself is guarded by a blocking mutex held only for lookups;
//! each session carries its own async lock so one slow narrator call never
//! blocks unrelated sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use sw_core::{Session, SessionId};

/// Shared handle to one live session.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Concurrent map from session id to live session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `id`, creating it with `make` if absent.
    pub fn get_or_create(&self, id: SessionId, make: impl FnOnce() -> Session) -> SessionHandle {
        let mut map = self.lock();
        Arc::clone(
            map.entry(id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(make()))),
        )
    }

    /// Fetch an existing session, if any.
    pub fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.lock().get(&id).cloned()
    }

    /// Drop a session from the store, returning its handle if it existed.
    pub fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        self.lock().remove(&id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, SessionHandle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
