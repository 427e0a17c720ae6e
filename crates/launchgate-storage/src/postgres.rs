//! PostgreSQL registration store.
//!
//! Stores registrations in a single `registrations` table keyed by email.
//! Uniqueness of both the email (primary key) and the code (unique
//! constraint) is enforced by the schema; `claim` is a single conditional
//! `UPDATE` so the check-then-set of seller binding is atomic on the server.
//!
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime for fully async operations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{Registration, RegistrationStore, StoreError};

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// A registration store backed by PostgreSQL.
///
/// Thread-safe via `PgPool` (connection pool). All operations are fully
/// async.
///
/// # Examples
///
/// ```no_run
/// # use launchgate_storage::PostgresStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = PostgresStore::connect("postgres://localhost/launchgate").await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PostgresStore {
    /// Connect to PostgreSQL and run the initial migration.
    ///
    /// Creates the `registrations` table if it does not exist. The migration
    /// is idempotent, so several instances can start against the same
    /// database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the connection or migration fails.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Open {
                reason: e.to_string(),
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS registrations (\
                email      TEXT PRIMARY KEY, \
                code       TEXT NOT NULL UNIQUE, \
                seller     TEXT, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Open {
            reason: format!("migration failed: {e}"),
        })?;

        tracing::debug!("registrations table ready");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl RegistrationStore for PostgresStore {
    async fn insert(&self, email: &str, code: &str) -> Result<Registration, StoreError> {
        sqlx::query_as::<_, Registration>(
            r"INSERT INTO registrations (email, code)
              VALUES ($1, $2)
              RETURNING email, code, seller, created_at",
        )
        .bind(email)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_insert_error(&e, email, code))
    }

    async fn find(&self, email: &str, code: &str) -> Result<Option<Registration>, StoreError> {
        sqlx::query_as::<_, Registration>(
            r"SELECT email, code, seller, created_at
              FROM registrations
              WHERE email = $1 AND code = $2",
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Read {
            reason: e.to_string(),
        })
    }

    async fn claim(&self, email: &str, code: &str, seller: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"UPDATE registrations
              SET seller = $3
              WHERE email = $1 AND code = $2 AND seller IS NULL",
        )
        .bind(email)
        .bind(code)
        .bind(seller)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write {
            reason: e.to_string(),
        })?;

        Ok(result.rows_affected() == 1)
    }
}

/// Classify an insert failure by inspecting the violated constraint.
///
/// The schema carries two uniqueness constraints: `registrations_pkey`
/// (email) and `registrations_code_key` (code). Anything else is a plain
/// write failure.
fn classify_insert_error(err: &sqlx::Error, email: &str, code: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return match db_err.constraint() {
                Some("registrations_pkey") => StoreError::DuplicateEmail {
                    email: email.to_owned(),
                },
                Some("registrations_code_key") => StoreError::DuplicateCode {
                    code: code.to_owned(),
                },
                _ => StoreError::Write {
                    reason: format!("unique violation: {db_err}"),
                },
            };
        }
    }

    StoreError::Write {
        reason: err.to_string(),
    }
}
