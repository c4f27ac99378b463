//! Error handling for exechist-store
//!
//! Wraps exechist-core ExError with store-specific helpers

use exechist_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::IntegrityViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a CAS collision error
pub fn cas_collision(digest: &str) -> ExError {
    ExError::new(ExErrorKind::IntegrityViolation)
        .with_op("cas_write")
        .with_message(format!("CAS collision for digest {}", digest))
}

/// Create a CAS corruption error (stored bytes no longer match their digest)
pub fn cas_corrupt(digest: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::IntegrityViolation)
        .with_op("cas_read")
        .with_message(format!(
            "CAS blob {} is corrupt: content hashes to {}",
            digest, actual
        ))
}

/// Create a CAS missing blob error
pub fn cas_missing(digest: &str) -> ExError {
    ExError::new(ExErrorKind::MissingBlob)
        .with_op("cas_read")
        .with_message(format!("CAS blob not found for digest {}", digest))
}

/// Create an error for a value that cannot be represented in a ledger column
pub fn out_of_range(column: &str, value: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("ledger_column")
        .with_message(format!("{} out of range: {}", column, value))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an error for a poisoned connection lock
pub fn lock_poisoned(resource: &str) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("lock")
        .with_message(format!("Lock poisoned: {}", resource))
}
