//! Error types for `launchgate-core`.
//!
//! Each failure reason gets its own variant so callers can surface a
//! specific message — validation problems tell the user what to fix,
//! business-rule conflicts are terminal for the attempt, and store failures
//! may be retried by the caller. Nothing is swallowed.

use launchgate_storage::StoreError;

/// A string failed access-code validation.
#[derive(Debug, thiserror::Error)]
#[error("access code must be four letters or digits, a hyphen, then four more (like 7QX9-2KLM)")]
pub struct CodeError;

/// A string failed email-address validation.
#[derive(Debug, thiserror::Error)]
#[error("'{candidate}' is not a valid email address")]
pub struct EmailError {
    /// The rejected input.
    pub candidate: String,
}

/// Errors from issuing an access code.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// The supplied email address is not syntactically valid.
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    /// A registration already exists for this email.
    #[error("a registration already exists for '{email}'")]
    AlreadyRegistered { email: String },

    /// Every generated code collided with an existing registration.
    #[error("could not draw an unused access code after {attempts} attempts")]
    CodeCollision { attempts: u32 },

    /// The store rejected the write.
    #[error("issue failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors from binding a seller to a registration.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A required field was empty or absent.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The access code does not look like an issued code.
    #[error("access code must be 9 characters drawn from A-Z, 0-9, and '-'")]
    BadCodeFormat,

    /// The email address is not syntactically valid.
    #[error("email address is not valid")]
    BadEmailFormat,

    /// No registration matches the email and code pair.
    #[error("no registration matches that email and access code")]
    NotFound,

    /// The registration already has a seller assigned.
    #[error("this registration already has a seller assigned")]
    AlreadyBound,

    /// The store failed while looking up or updating the registration.
    #[error("bind failed: {0}")]
    Store(#[from] StoreError),
}
