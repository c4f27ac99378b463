//! SQLite-backed implementations of the history store and output registry

pub mod history_repo;
pub mod output_files_repo;

pub use history_repo::{HistoryEntry, SqliteExecutionHistoryStore};
pub use output_files_repo::SqliteOutputFilesRepository;
