//! Email addresses.
//!
//! [`EmailAddress`] enforces the address screen a signup form applies:
//! `local@domain.tld` with non-empty parts, no whitespace, a single `@`, and
//! an interior dot in the domain. It is intentionally permissive — the goal
//! is to reject obvious garbage before it is pinned into the store forever,
//! not to implement RFC 5321.

use std::fmt;

use crate::error::EmailError;

/// A validated email address.
///
/// Construction goes through [`parse`](EmailAddress::parse), so holding an
/// `EmailAddress` means holding one that passed the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate a candidate address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the candidate is empty, contains
    /// whitespace, has no `@` (or more than one), has an empty local or
    /// domain part, or lacks a dot with characters on both sides in the
    /// domain.
    pub fn parse(candidate: &str) -> Result<Self, EmailError> {
        let reject = || EmailError {
            candidate: candidate.to_owned(),
        };

        if candidate.chars().any(char::is_whitespace) {
            return Err(reject());
        }

        let Some((local, domain)) = candidate.split_once('@') else {
            return Err(reject());
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(reject());
        }

        // The domain needs a dot with at least one character on each side.
        let interior_dot = domain
            .match_indices('.')
            .any(|(i, _)| i > 0 && i + 1 < domain.len());
        if !interior_dot {
            return Err(reject());
        }

        Ok(Self(candidate.to_owned()))
    }

    /// View the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
