//! Units of work and the stores they persist to.

use exechist_core::history::ExecutionHistoryStore;
use exechist_core::model::WorkIdentity;
use exechist_core::outputs::OutputFilesRepository;
use exechist_core::steps::UnitOfWork;
use exechist_store::cas::FsStore;
use exechist_store::db;
use exechist_store::errors::Result;
use exechist_store::{SqliteExecutionHistoryStore, SqliteOutputFilesRepository, StoreConfig};
use std::sync::Arc;

/// A unit of work identified by `identity` whose history lives in `history`
#[derive(Clone)]
pub struct WorkUnit {
    identity: WorkIdentity,
    history: Arc<dyn ExecutionHistoryStore>,
}

impl WorkUnit {
    pub fn new(identity: WorkIdentity, history: Arc<dyn ExecutionHistoryStore>) -> Self {
        Self { identity, history }
    }
}

impl UnitOfWork for WorkUnit {
    fn identity(&self) -> &WorkIdentity {
        &self.identity
    }

    fn execution_history_store(&self) -> &dyn ExecutionHistoryStore {
        self.history.as_ref()
    }
}

/// History store and output registry sharing one SQLite database
#[derive(Clone)]
pub struct Stores {
    pub history: Arc<SqliteExecutionHistoryStore>,
    pub outputs: Arc<SqliteOutputFilesRepository>,
}

impl Stores {
    /// Open (and migrate) the stores named by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_shared(&config.db_path)?;
        Ok(Self {
            history: Arc::new(SqliteExecutionHistoryStore::new(
                conn.clone(),
                FsStore::new(&config.cas_root),
            )),
            outputs: Arc::new(SqliteOutputFilesRepository::new(conn)),
        })
    }

    /// A unit of work persisting to these stores
    pub fn work(&self, identity: WorkIdentity) -> WorkUnit {
        WorkUnit::new(identity, self.history.clone())
    }

    pub fn output_files(&self) -> Arc<dyn OutputFilesRepository> {
        self.outputs.clone()
    }
}
