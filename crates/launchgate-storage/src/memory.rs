//! In-memory registration store for testing.
//!
//! Stores all registrations in a `BTreeMap` behind a `RwLock`. Nothing is
//! persistent — all data is lost when the process exits. Use this for unit
//! tests and local development where you need a real store without a
//! database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{Registration, RegistrationStore, StoreError};

/// An in-memory registration store keyed by email.
///
/// Thread-safe and async-compatible. `claim` holds the write lock across its
/// check-and-set, so concurrent claims on one registration are serialized
/// exactly like a conditional database update.
///
/// # Examples
///
/// ```
/// # use launchgate_storage::{MemoryStore, RegistrationStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.insert("alice@example.com", "7QX9-2KLM").await.unwrap();
/// let reg = store.find("alice@example.com", "7QX9-2KLM").await.unwrap();
/// assert!(reg.unwrap().seller.is_none());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rows: Arc<RwLock<BTreeMap<String, Registration>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, email: &str, code: &str) -> Result<Registration, StoreError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(email) {
            return Err(StoreError::DuplicateEmail {
                email: email.to_owned(),
            });
        }
        if rows.values().any(|r| r.code == code) {
            return Err(StoreError::DuplicateCode {
                code: code.to_owned(),
            });
        }

        let reg = Registration {
            email: email.to_owned(),
            code: code.to_owned(),
            seller: None,
            created_at: Utc::now(),
        };
        rows.insert(email.to_owned(), reg.clone());
        Ok(reg)
    }

    async fn find(&self, email: &str, code: &str) -> Result<Option<Registration>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(email).filter(|r| r.code == code).cloned())
    }

    async fn claim(&self, email: &str, code: &str, seller: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(email) {
            Some(r) if r.code == code && r.seller.is_none() => {
                r.seller = Some(seller.to_owned());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
