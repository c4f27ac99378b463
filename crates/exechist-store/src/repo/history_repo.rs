//! SQLite execution history store
//!
//! Each stored record is serialized to JSON and written to CAS; the
//! `execution_history` ledger keeps one row per identity pointing at the
//! digest of its latest record.

use crate::cas::FsStore;
use crate::config::StoreConfig;
use crate::db::{self, SharedConnection};
use crate::errors::{from_rusqlite, out_of_range, serialization_error, Result};
use exechist_core::errors::{ExError, HistoryError};
use exechist_core::history::ExecutionHistoryStore;
use exechist_core::model::{AfterPreviousExecutionState, HistoryRecord, WorkIdentity};
use exechist_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::OptionalExtension;
use std::time::Instant;

const RECORD_EXTENSION: &str = "json";

/// Ledger row describing the latest stored record of one identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub identity: WorkIdentity,
    pub record_digest: String,
    pub successful: bool,
    pub build_invocation_id: String,
    pub execution_time_ms: u64,
    /// Unix milliseconds
    pub stored_at: i64,
}

/// History store backed by a SQLite ledger and a filesystem CAS
pub struct SqliteExecutionHistoryStore {
    conn: SharedConnection,
    cas: FsStore,
}

impl SqliteExecutionHistoryStore {
    pub fn new(conn: SharedConnection, cas: FsStore) -> Self {
        Self { conn, cas }
    }

    /// Open (and migrate) the database and CAS named by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_shared(&config.db_path)?;
        Ok(Self::new(conn, FsStore::new(&config.cas_root)))
    }

    /// Ledger rows for every identity with stored history, sorted by identity
    pub fn list_identities(&self) -> Result<Vec<HistoryEntry>> {
        let conn = db::lock(&self.conn)?;
        let mut stmt = conn
            .prepare(
                "SELECT identity, record_digest, successful, build_invocation_id,
                        execution_time_ms, stored_at
                 FROM execution_history
                 ORDER BY identity",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.into_iter()
            .map(
                |(identity, record_digest, successful, build_invocation_id, time_ms, stored_at)| {
                    Ok(HistoryEntry {
                        identity: WorkIdentity::new(identity)?,
                        record_digest,
                        successful,
                        build_invocation_id,
                        execution_time_ms: u64::try_from(time_ms)
                            .map_err(|_| out_of_range("execution_time_ms", time_ms))?,
                        stored_at,
                    })
                },
            )
            .collect()
    }

    /// The full stored record for an identity
    pub fn record(&self, identity: &WorkIdentity) -> Result<Option<HistoryRecord>> {
        let digest: Option<String> = {
            let conn = db::lock(&self.conn)?;
            conn.query_row(
                "SELECT record_digest FROM execution_history WHERE identity = ?1",
                [identity.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?
        };

        let Some(digest) = digest else {
            return Ok(None);
        };

        let bytes = self
            .cas
            .read(&digest, RECORD_EXTENSION)
            .map_err(|e| e.with_identity(identity.as_str()))?;
        let record: HistoryRecord = serde_json::from_slice(&bytes)
            .map_err(|e| serialization_error("decode_history_record", e))?;

        if &record.identity != identity {
            return Err(ExError::from(HistoryError::IdentityMismatch {
                expected: identity.to_string(),
                found: record.identity.to_string(),
            })
            .with_op("load_history"));
        }

        Ok(Some(record))
    }

    /// Delete the ledger row of `identity`, returning whether one existed
    pub fn delete(&self, identity: &WorkIdentity) -> Result<bool> {
        let conn = db::lock(&self.conn)?;
        let removed = conn
            .execute(
                "DELETE FROM execution_history WHERE identity = ?1",
                [identity.as_str()],
            )
            .map_err(from_rusqlite)?;
        tracing::debug!(identity = %identity, removed, "Removed execution history");
        Ok(removed > 0)
    }

    fn write_record(&self, record: &HistoryRecord) -> Result<String> {
        let execution_time_ms = i64::try_from(record.origin_metadata.execution_time_ms).map_err(|_| {
            out_of_range("execution_time_ms", record.origin_metadata.execution_time_ms)
        })?;
        let json = serde_json::to_vec(record)
            .map_err(|e| serialization_error("encode_history_record", e))?;
        let digest = self.cas.write(&json, RECORD_EXTENSION)?;

        let conn = db::lock(&self.conn)?;
        conn.execute(
            "INSERT INTO execution_history (
                identity, record_digest, successful, build_invocation_id,
                execution_time_ms, stored_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(identity) DO UPDATE SET
                record_digest = excluded.record_digest,
                successful = excluded.successful,
                build_invocation_id = excluded.build_invocation_id,
                execution_time_ms = excluded.execution_time_ms,
                stored_at = excluded.stored_at",
            rusqlite::params![
                record.identity.as_str(),
                digest,
                record.successful,
                record.origin_metadata.build_invocation_id.as_str(),
                execution_time_ms,
                chrono::Utc::now().timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(digest)
    }
}

impl ExecutionHistoryStore for SqliteExecutionHistoryStore {
    fn load(&self, identity: &WorkIdentity) -> Result<Option<AfterPreviousExecutionState>> {
        Ok(self.record(identity)?.map(AfterPreviousExecutionState::from))
    }

    fn store(&self, record: HistoryRecord) -> Result<()> {
        let start = Instant::now();
        log_op_start!("store_history", identity = %record.identity);

        match self.write_record(&record) {
            Ok(digest) => {
                log_op_end!(
                    "store_history",
                    duration_ms = start.elapsed().as_millis() as u64,
                    identity = %record.identity,
                    record_digest = %digest
                );
                Ok(())
            }
            Err(err) => {
                let err = err.with_identity(record.identity.as_str());
                log_op_error!(
                    "store_history",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    identity = %record.identity
                );
                Err(err)
            }
        }
    }

    fn remove(&self, identity: &WorkIdentity) -> Result<()> {
        self.delete(identity).map(|_| ())
    }
}
