//! In-memory lead store.
//!
//! Leads live in a `BTreeMap` behind a `RwLock`. Nothing is persisted: all
//! data is lost when the process exits. Use this for development servers
//! and tests that need a real store without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use unikhoj_core::lead::{Lead, LeadId, NewLead};

use crate::{LeadStore, StorageError};

/// An in-memory lead store.
///
/// Cloning is cheap and clones share the same data, which lets tests keep
/// a handle for inspection after handing the store to a server.
///
/// # Examples
///
/// ```
/// # use unikhoj_storage::{LeadStore, MemoryStore};
/// # use unikhoj_core::lead::{BudgetBracket, Degree, NewLead, TestType};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let lead = store
///     .create(NewLead {
///         full_name: "Ram Sharma".to_owned(),
///         phone: "9812345678".to_owned(),
///         email: None,
///         degree: Degree::Bachelors,
///         gpa: "3.5".to_owned(),
///         test_type: TestType::None,
///         test_score: None,
///         country: "USA".to_owned(),
///         budget: BudgetBracket::From15To25L,
///     })
///     .await
///     .unwrap();
/// assert_eq!(store.get(lead.id).await.unwrap(), Some(lead));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    leads: Arc<RwLock<BTreeMap<LeadId, Lead>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored leads.
    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    /// Whether no lead has been stored.
    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }

    /// Snapshot of every stored lead, oldest first.
    pub async fn leads(&self) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self.leads.read().await.values().cloned().collect();
        leads.sort_by_key(|l| l.created_at);
        leads
    }
}

#[async_trait::async_trait]
impl LeadStore for MemoryStore {
    async fn create(&self, lead: NewLead) -> Result<Lead, StorageError> {
        let lead = lead.into_lead(Utc::now());
        let mut leads = self.leads.write().await;
        leads.insert(lead.id, lead.clone());
        Ok(lead)
    }

    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StorageError> {
        Ok(self.leads.read().await.get(&id).cloned())
    }
}
