//! Code issuance.
//!
//! [`CodeIssuer`] creates registrations: validate the email, draw a fresh
//! access code, and durably insert the pair with no seller bound. The store
//! enforces uniqueness of both columns; a code collision just means drawing
//! again, while a duplicate email is a terminal conflict surfaced to the
//! caller.

use std::fmt;
use std::sync::Arc;

use launchgate_storage::{Registration, RegistrationStore, StoreError};
use tracing::{info, warn};

use crate::code::AccessCode;
use crate::email::EmailAddress;
use crate::error::IssueError;

/// How many fresh codes to try before giving up. With 36^8 combinations a
/// single redraw is already rare; hitting this limit means the store is
/// misbehaving, not that the space is full.
const MAX_CODE_ATTEMPTS: u32 = 4;

/// The issuance workflow operation.
///
/// Stateless apart from the injected store handle; cheap to clone and share
/// across request handlers.
#[derive(Clone)]
pub struct CodeIssuer {
    store: Arc<dyn RegistrationStore>,
}

impl fmt::Debug for CodeIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeIssuer").finish_non_exhaustive()
    }
}

impl CodeIssuer {
    /// Create an issuer over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Issue an access code for `email` and record the registration.
    ///
    /// Not idempotent: the second call for an email fails with
    /// [`IssueError::AlreadyRegistered`] rather than returning the first
    /// code again.
    ///
    /// # Errors
    ///
    /// - [`IssueError::InvalidEmail`] if the address fails the screen —
    ///   checked before any store access.
    /// - [`IssueError::AlreadyRegistered`] if the email already has a
    ///   registration.
    /// - [`IssueError::CodeCollision`] if every drawn code was taken.
    /// - [`IssueError::Store`] if the store rejects the write.
    pub async fn issue(&self, email: &str) -> Result<Registration, IssueError> {
        let email = EmailAddress::parse(email)?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = AccessCode::generate();
            match self.store.insert(email.as_str(), code.as_str()).await {
                Ok(reg) => {
                    info!(email = %email, "registration created");
                    return Ok(reg);
                }
                Err(StoreError::DuplicateEmail { email }) => {
                    return Err(IssueError::AlreadyRegistered { email });
                }
                Err(StoreError::DuplicateCode { .. }) => {
                    warn!(attempt, "access code collision, drawing a new code");
                }
                Err(e) => return Err(IssueError::Store(e)),
            }
        }

        Err(IssueError::CodeCollision {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use launchgate_storage::MemoryStore;

    use super::*;

    fn issuer_over(store: MemoryStore) -> CodeIssuer {
        CodeIssuer::new(Arc::new(store))
    }

    /// A store that fails every call. Lets tests prove validation
    /// short-circuits before any store access.
    struct FailingStore;

    #[async_trait::async_trait]
    impl RegistrationStore for FailingStore {
        async fn insert(&self, _: &str, _: &str) -> Result<Registration, StoreError> {
            Err(StoreError::Write {
                reason: "store should not have been touched".to_owned(),
            })
        }

        async fn find(&self, _: &str, _: &str) -> Result<Option<Registration>, StoreError> {
            Err(StoreError::Read {
                reason: "store should not have been touched".to_owned(),
            })
        }

        async fn claim(&self, _: &str, _: &str, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Write {
                reason: "store should not have been touched".to_owned(),
            })
        }
    }

    /// A store whose first `collisions` inserts report a duplicate code.
    struct CollidingStore {
        inner: MemoryStore,
        collisions: AtomicU32,
    }

    #[async_trait::async_trait]
    impl RegistrationStore for CollidingStore {
        async fn insert(&self, email: &str, code: &str) -> Result<Registration, StoreError> {
            if self
                .collisions
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError::DuplicateCode {
                    code: code.to_owned(),
                });
            }
            self.inner.insert(email, code).await
        }

        async fn find(&self, email: &str, code: &str) -> Result<Option<Registration>, StoreError> {
            self.inner.find(email, code).await
        }

        async fn claim(&self, email: &str, code: &str, seller: &str) -> Result<bool, StoreError> {
            self.inner.claim(email, code, seller).await
        }
    }

    #[tokio::test]
    async fn issue_creates_unbound_registration_with_canonical_code() {
        let store = MemoryStore::new();
        let issuer = issuer_over(store.clone());

        let reg = issuer.issue("alice@example.com").await.unwrap();
        assert!(AccessCode::parse(&reg.code).is_ok());
        assert_eq!(reg.email, "alice@example.com");
        assert_eq!(reg.seller, None);

        // The row is durably in the store.
        let found = store.find("alice@example.com", &reg.code).await.unwrap();
        assert_eq!(found, Some(reg));
    }

    #[tokio::test]
    async fn issue_rejects_bad_email_before_store_access() {
        let issuer = CodeIssuer::new(Arc::new(FailingStore));
        let err = issuer.issue("not-an-email").await.unwrap_err();
        assert!(matches!(err, IssueError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn second_issue_for_same_email_fails_loudly() {
        let issuer = issuer_over(MemoryStore::new());
        issuer.issue("alice@example.com").await.unwrap();

        let err = issuer.issue("alice@example.com").await.unwrap_err();
        assert!(matches!(err, IssueError::AlreadyRegistered { .. }));
    }

    #[tokio::test]
    async fn issue_redraws_after_code_collision() {
        let store = CollidingStore {
            inner: MemoryStore::new(),
            collisions: AtomicU32::new(2),
        };
        let issuer = CodeIssuer::new(Arc::new(store));

        let reg = issuer.issue("alice@example.com").await.unwrap();
        assert!(AccessCode::parse(&reg.code).is_ok());
    }

    #[tokio::test]
    async fn issue_gives_up_when_every_code_collides() {
        let store = CollidingStore {
            inner: MemoryStore::new(),
            collisions: AtomicU32::new(u32::MAX),
        };
        let issuer = CodeIssuer::new(Arc::new(store));

        let err = issuer.issue("alice@example.com").await.unwrap_err();
        assert!(matches!(err, IssueError::CodeCollision { attempts: 4 }));
    }

    #[tokio::test]
    async fn store_failures_surface_to_the_caller() {
        let issuer = CodeIssuer::new(Arc::new(FailingStore));
        let err = issuer.issue("alice@example.com").await.unwrap_err();
        assert!(matches!(err, IssueError::Store(StoreError::Write { .. })));
    }
}
