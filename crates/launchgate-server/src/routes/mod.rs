//! HTTP routes for the Launchgate API.

pub mod registrations;
pub mod sys;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Compose the full API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/v1/registrations", registrations::router())
        .nest("/v1/sys", sys::router())
        .with_state(state)
}
