//! Launchgate HTTP server.
//!
//! Wires together the core workflows, a registration store, and the HTTP
//! routes into a running Axum server. Serves the JSON API at `/v1/*`: code
//! issuance for the splash page and seller verification for the claim page.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
