//! Registration store abstraction for Launchgate.
//!
//! This crate defines the [`RegistrationStore`] trait — the persistence
//! interface the issuance and binding workflows depend on. It knows nothing
//! about code generation or validation; it only stores registrations and
//! guarantees the two constraints the workflows rely on: one registration per
//! email, and an atomic "claim" that assigns a seller only while none is set.
//!
//! Two implementations are provided:
//!
//! - [`PostgresStore`] — production backend (feature `postgres-backend`, default)
//! - [`MemoryStore`] — in-memory, for tests and local development

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres::PostgresStore;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted registration: an email bound to an access code and,
/// eventually, to the seller who claimed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres-backend", derive(sqlx::FromRow))]
pub struct Registration {
    /// The registrant's email address. Natural key — unique per registration.
    pub email: String,
    /// The issued access code in `XXXX-XXXX` form. Immutable after creation.
    pub code: String,
    /// The seller who claimed this registration, or `None` while unclaimed.
    pub seller: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pluggable registration store.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`)
/// and must serialize [`claim`](RegistrationStore::claim) per `(email, code)`
/// pair: two concurrent claims on the same unclaimed registration must never
/// both return `true`.
#[async_trait::async_trait]
pub trait RegistrationStore: Send + Sync + 'static {
    /// Durably create a registration with no seller bound.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateEmail`] if a registration already exists for
    ///   this email.
    /// - [`StoreError::DuplicateCode`] if the code is already in use by
    ///   another registration. Callers regenerate and retry.
    /// - [`StoreError::Write`] if the underlying backend fails.
    async fn insert(&self, email: &str, code: &str) -> Result<Registration, StoreError>;

    /// Fetch the registration matching BOTH the email and the code.
    ///
    /// A code alone is not sufficient to locate a registration — the pair
    /// must match the same row. Returns `Ok(None)` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the underlying backend fails.
    async fn find(&self, email: &str, code: &str) -> Result<Option<Registration>, StoreError>;

    /// Atomically assign `seller` to the matching registration, but only if
    /// no seller is currently set.
    ///
    /// Returns `true` iff a row was claimed by this call. Returns `false`
    /// when no matching row exists or the row already has a seller — the
    /// caller distinguishes the two with [`find`](RegistrationStore::find).
    ///
    /// This is the single mutating primitive of the binding workflow; the
    /// check and the write happen in one guarded step so concurrent claims
    /// on the same pair have exactly one winner.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the underlying backend fails.
    async fn claim(&self, email: &str, code: &str, seller: &str) -> Result<bool, StoreError>;
}
