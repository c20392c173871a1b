//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{Latency, Store};
use crate::services::SessionStore;
use crate::storage::SharedStorage;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
    sessions: SessionStore,
}

impl AppState {
    /// Build state over `storage`. The entity store and the session store
    /// share the same backend.
    #[must_use]
    pub fn new(storage: SharedStorage, latency: Latency) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                sessions: SessionStore::new(Arc::clone(&storage)),
                store: Store::new(storage, latency),
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    #[must_use]
    pub fn latency(&self) -> &Latency {
        self.inner.store.latency()
    }

    #[must_use]
    pub fn storage(&self) -> &SharedStorage {
        self.inner.store.storage()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.inner.store)
            .finish_non_exhaustive()
    }
}
