//! Shared application state for the Launchgate server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the two workflow operations, each
//! wired to the same injected registration store.

use std::sync::Arc;

use launchgate_core::{CodeIssuer, SellerBinder};
use launchgate_storage::RegistrationStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Issues access codes and records registrations.
    pub issuer: CodeIssuer,
    /// Binds sellers to existing registrations.
    pub binder: SellerBinder,
}

impl AppState {
    /// Build the state over a single store handle shared by both workflows.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self {
            issuer: CodeIssuer::new(Arc::clone(&store)),
            binder: SellerBinder::new(store),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
