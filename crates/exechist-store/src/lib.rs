//! exechist Store - Persistence layer with SQLite and CAS
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Content-addressable storage (CAS) for history records
//! - SQLite-backed execution history store and output registry
//! - Store location configuration

pub mod cas;
pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use repo::{HistoryEntry, SqliteExecutionHistoryStore, SqliteOutputFilesRepository};
