//! `PostgreSQL` lead store.
//!
//! Stores leads in a single `leads` table. Enum fields are stored as their
//! wire codes in `TEXT` columns and parsed back on read.
//!
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime for fully async operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use unikhoj_core::lead::{Lead, LeadId, NewLead};

use crate::{LeadStore, StorageError};

/// A lead store backed by `PostgreSQL`.
///
/// Thread-safe via `PgPool`; the pool handles concurrent inserts.
///
/// # Examples
///
/// ```no_run
/// # use unikhoj_storage::PostgresStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = PostgresStore::connect("postgres://localhost:5432/unikhoj").await.unwrap();
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

/// Raw `leads` row.
#[derive(sqlx::FromRow)]
struct LeadRow {
    id: Uuid,
    full_name: String,
    phone: String,
    email: Option<String>,
    degree: String,
    gpa: String,
    test_type: String,
    test_score: Option<String>,
    country: String,
    budget: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = StorageError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: unikhoj_core::error::ParseFieldError| StorageError::Corrupt {
            id: id.to_string(),
            reason: e.to_string(),
        };

        Ok(Self {
            id: LeadId::from_uuid(row.id),
            degree: row.degree.parse().map_err(corrupt)?,
            test_type: row.test_type.parse().map_err(corrupt)?,
            budget: row.budget.parse().map_err(corrupt)?,
            full_name: row.full_name,
            phone: row.phone,
            email: row.email,
            gpa: row.gpa,
            test_score: row.test_score,
            country: row.country,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PostgresStore {
    /// Connect to `PostgreSQL` and run the initial migration.
    ///
    /// Creates the `leads` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the connection or migration fails.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Open {
                target: redact(database_url),
                reason: e.to_string(),
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS leads (\
                id         UUID        PRIMARY KEY, \
                full_name  TEXT        NOT NULL, \
                phone      TEXT        NOT NULL, \
                email      TEXT, \
                degree     TEXT        NOT NULL, \
                gpa        TEXT        NOT NULL, \
                test_type  TEXT        NOT NULL DEFAULT 'ielts', \
                test_score TEXT, \
                country    TEXT        NOT NULL, \
                budget     TEXT        NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL, \
                updated_at TIMESTAMPTZ NOT NULL\
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StorageError::Open {
            target: redact(database_url),
            reason: format!("migration failed: {e}"),
        })?;

        tracing::debug!("leads table ready");

        Ok(Self { pool })
    }

    /// Return a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl LeadStore for PostgresStore {
    async fn create(&self, lead: NewLead) -> Result<Lead, StorageError> {
        let lead = lead.into_lead(Utc::now());

        sqlx::query(
            "INSERT INTO leads (id, full_name, phone, email, degree, gpa, test_type, \
             test_score, country, budget, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(lead.id.as_uuid())
        .bind(&lead.full_name)
        .bind(&lead.phone)
        .bind(lead.email.as_deref())
        .bind(lead.degree.as_str())
        .bind(&lead.gpa)
        .bind(lead.test_type.as_str())
        .bind(lead.test_score.as_deref())
        .bind(&lead.country)
        .bind(lead.budget.as_str())
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Write {
            id: lead.id.to_string(),
            reason: e.to_string(),
        })?;

        Ok(lead)
    }

    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StorageError> {
        let row: Option<LeadRow> = sqlx::query_as("SELECT * FROM leads WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Read {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        row.map(Lead::try_from).transpose()
    }
}

/// Strip credentials from a connection string before it reaches a log line.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://[redacted]{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_hides_credentials() {
        assert_eq!(
            redact("postgres://user:secret@db:5432/unikhoj"),
            "postgres://[redacted]@db:5432/unikhoj"
        );
    }

    #[test]
    fn redact_keeps_urls_without_credentials() {
        assert_eq!(
            redact("postgres://localhost:5432/unikhoj"),
            "postgres://localhost:5432/unikhoj"
        );
    }

    #[test]
    fn corrupt_enum_is_reported() {
        let row = LeadRow {
            id: Uuid::new_v4(),
            full_name: "Ram Sharma".to_owned(),
            phone: "9812345678".to_owned(),
            email: None,
            degree: "phd".to_owned(),
            gpa: "3.5".to_owned(),
            test_type: "none".to_owned(),
            test_score: None,
            country: "USA".to_owned(),
            budget: "15-25L".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            Lead::try_from(row),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
