//! Seller binding.
//!
//! [`SellerBinder`] assigns a seller to an existing registration exactly
//! once. Input validation runs fully before any store access, in a fixed
//! order (presence, code format, email format) so the caller always learns
//! the first problem to fix. The write itself is the store's conditional
//! claim — two concurrent binds on the same registration have exactly one
//! winner.

use std::fmt;
use std::sync::Arc;

use launchgate_storage::RegistrationStore;
use tracing::info;

use crate::code::AccessCode;
use crate::email::EmailAddress;
use crate::error::BindError;

/// The binding workflow operation.
///
/// Stateless apart from the injected store handle; cheap to clone and share
/// across request handlers.
#[derive(Clone)]
pub struct SellerBinder {
    store: Arc<dyn RegistrationStore>,
}

impl fmt::Debug for SellerBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SellerBinder").finish_non_exhaustive()
    }
}

impl SellerBinder {
    /// Create a binder over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Bind `seller` to the registration matching `code` and `email`.
    ///
    /// The seller column transitions unset → set exactly once; a bound
    /// registration can never be re-assigned.
    ///
    /// # Errors
    ///
    /// - [`BindError::MissingField`] if any field is empty — checked first.
    /// - [`BindError::BadCodeFormat`] if the code fails the 9-character
    ///   `A-Z0-9-` screen.
    /// - [`BindError::BadEmailFormat`] if the email fails the address screen.
    /// - [`BindError::NotFound`] if no registration matches both fields.
    /// - [`BindError::AlreadyBound`] if a seller is already assigned,
    ///   including when a concurrent bind won the race.
    /// - [`BindError::Store`] if the store fails at either step.
    pub async fn bind(&self, code: &str, email: &str, seller: &str) -> Result<(), BindError> {
        for (field, value) in [("code", code), ("email", email), ("seller", seller)] {
            if value.is_empty() {
                return Err(BindError::MissingField { field });
            }
        }
        if !AccessCode::plausible(code) {
            return Err(BindError::BadCodeFormat);
        }
        if EmailAddress::parse(email).is_err() {
            return Err(BindError::BadEmailFormat);
        }

        let Some(reg) = self.store.find(email, code).await? else {
            return Err(BindError::NotFound);
        };
        if reg.seller.is_some() {
            return Err(BindError::AlreadyBound);
        }

        if self.store.claim(email, code, seller).await? {
            info!(email = %email, seller = %seller, "seller bound to registration");
            Ok(())
        } else {
            // The row was unclaimed a moment ago, so a concurrent bind won.
            Err(BindError::AlreadyBound)
        }
    }
}
