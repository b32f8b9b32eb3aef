//! Lead storage for `UniKhoj`.
//!
//! This crate defines the [`LeadStore`] trait, the persistence boundary of
//! the lead API. The store is append-only: a lead is created exactly once
//! and never updated or deleted. There is no uniqueness constraint, so two
//! identical submissions produce two records.
//!
//! Two implementations are provided:
//!
//! - [`PostgresStore`]: production default, backed by `PostgreSQL` via
//!   `sqlx` (feature `postgres-backend`)
//! - [`MemoryStore`]: in-memory, for development and tests

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;

pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresStore;

use unikhoj_core::lead::{Lead, LeadId, NewLead};

/// A pluggable, append-only lead store.
///
/// Implementations generate the identifier and timestamps and must be safe
/// to share across async tasks (`Send + Sync`). Each store handles its own
/// internal concurrency; callers perform no locking.
#[async_trait::async_trait]
pub trait LeadStore: Send + Sync + 'static {
    /// Persist a new lead and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn create(&self, lead: NewLead) -> Result<Lead, StorageError>;

    /// Fetch a lead by identifier.
    ///
    /// Returns `Ok(None)` if no lead has that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StorageError>;
}
