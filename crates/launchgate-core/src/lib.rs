//! Core library for Launchgate.
//!
//! Contains the access-code and email-address domain types plus the two
//! workflow operations of the registration system: [`CodeIssuer`], which
//! creates a registration and hands out its access code, and
//! [`SellerBinder`], which assigns a seller to an existing registration
//! exactly once. This crate depends on `launchgate-storage` for the store
//! trait and knows nothing about HTTP.

pub mod binder;
pub mod code;
pub mod email;
pub mod error;
pub mod issuer;

pub use binder::SellerBinder;
pub use code::AccessCode;
pub use email::EmailAddress;
pub use error::{BindError, CodeError, EmailError, IssueError};
pub use issuer::CodeIssuer;
