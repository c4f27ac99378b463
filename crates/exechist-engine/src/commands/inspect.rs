//! Read and maintenance operations over stored history and registered outputs.

use crate::work::Stores;
use exechist_core::errors::{ExError, HistoryError, Result};
use exechist_core::model::{HistoryRecord, WorkIdentity};
use exechist_core::outputs::OutputFilesRepository;
use exechist_store::HistoryEntry;
use std::path::Path;

/// Registry status of one filesystem location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStatus {
    /// The location is an output root or lies inside one
    pub generated_by_tool: bool,
    /// The location is an output root or an ancestor of one
    pub contains_generated_files: bool,
}

/// The stored record for `identity`.
///
/// # Errors
///
/// Returns a `NotFound` error when nothing was stored for the identity.
pub fn show_history(stores: &Stores, identity: &WorkIdentity) -> Result<HistoryRecord> {
    stores.history.record(identity)?.ok_or_else(|| {
        ExError::from(HistoryError::HistoryNotFound {
            identity: identity.to_string(),
        })
        .with_op("show_history")
    })
}

/// Ledger entries of every identity with stored history.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub fn list_history(stores: &Stores) -> Result<Vec<HistoryEntry>> {
    stores.history.list_identities()
}

/// Forget the stored history of `identity`.
///
/// Returns whether a record existed.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read or written.
pub fn remove_history(stores: &Stores, identity: &WorkIdentity) -> Result<bool> {
    stores.history.delete(identity)
}

/// Whether the build tool produced, or produced something inside, `path`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub fn check_output(stores: &Stores, path: &Path) -> Result<OutputStatus> {
    Ok(OutputStatus {
        generated_by_tool: stores.outputs.is_generated_by_tool(path)?,
        contains_generated_files: stores.outputs.contains_files_generated_by_tool(path)?,
    })
}
