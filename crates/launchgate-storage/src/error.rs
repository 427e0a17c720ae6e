//! Store error types.
//!
//! Every variant carries enough context to diagnose the problem without a
//! debugger. Uniqueness violations get their own variants because the
//! issuance workflow reacts differently to each: a duplicate email is a
//! terminal conflict, a duplicate code just means "draw again".

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to open or connect to the store.
    #[error("failed to open store: {reason}")]
    Open { reason: String },

    /// A registration already exists for this email.
    #[error("a registration already exists for '{email}'")]
    DuplicateEmail { email: String },

    /// The access code is already in use by another registration.
    #[error("access code '{code}' is already in use")]
    DuplicateCode { code: String },

    /// Failed to read from the store.
    #[error("store read failed: {reason}")]
    Read { reason: String },

    /// Failed to write to the store.
    #[error("store write failed: {reason}")]
    Write { reason: String },
}
