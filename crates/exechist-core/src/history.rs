//! Execution history store contract and the in-memory backend.

use crate::errors::{HistoryError, Result};
use crate::model::{AfterPreviousExecutionState, HistoryRecord, WorkIdentity};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Durable history of the last stored execution of each unit of work.
///
/// Implementations hold one record per identity; `store` replaces any
/// existing record (last write wins). Each call is one atomic logical
/// operation. Callers serialize calls for the same identity.
pub trait ExecutionHistoryStore: Send + Sync {
    /// Load the state recorded by the last stored execution, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self, identity: &WorkIdentity) -> Result<Option<AfterPreviousExecutionState>>;

    /// Store a record, replacing any earlier record for the same identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be durably written.
    fn store(&self, record: HistoryRecord) -> Result<()>;

    /// Forget the record for an identity. Removing a missing record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, identity: &WorkIdentity) -> Result<()>;
}

/// History kept in process memory.
///
/// Used by tests and by callers that only need history for the lifetime of
/// one process.
#[derive(Debug, Default)]
pub struct InMemoryExecutionHistoryStore {
    records: RwLock<BTreeMap<WorkIdentity, HistoryRecord>>,
}

impl InMemoryExecutionHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw stored record for an identity
    ///
    /// # Errors
    ///
    /// Returns a `Concurrency` error if the lock was poisoned.
    pub fn record(&self, identity: &WorkIdentity) -> Result<Option<HistoryRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(identity).cloned())
    }

    /// Number of identities with stored history
    ///
    /// # Errors
    ///
    /// Returns a `Concurrency` error if the lock was poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }

    /// # Errors
    ///
    /// Returns a `Concurrency` error if the lock was poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> HistoryError {
    HistoryError::LockPoisoned {
        resource: "in_memory_history".to_string(),
    }
}

impl ExecutionHistoryStore for InMemoryExecutionHistoryStore {
    fn load(&self, identity: &WorkIdentity) -> Result<Option<AfterPreviousExecutionState>> {
        Ok(self.record(identity)?.map(AfterPreviousExecutionState::from))
    }

    fn store(&self, record: HistoryRecord) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        tracing::debug!(
            identity = %record.identity,
            successful = record.successful,
            "Stored execution history in memory"
        );
        records.insert(record.identity.clone(), record);
        Ok(())
    }

    fn remove(&self, identity: &WorkIdentity) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.remove(identity);
        Ok(())
    }
}
