//! Shared application state for the `UniKhoj` server.
//!
//! A single [`AppState`] is built at startup and shared across all Axum
//! handlers via `Arc`. Handlers keep no other state between requests.

use std::sync::Arc;

use unikhoj_storage::LeadStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Persistent lead store; the API is its only writer.
    pub store: Arc<dyn LeadStore>,
}

impl AppState {
    /// Wrap a store in shareable state.
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
