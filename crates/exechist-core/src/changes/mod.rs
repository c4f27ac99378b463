//! Output change detection.
//!
//! Compares the output fingerprints recorded by the previous execution with
//! the ones captured after the current execution. Only a boolean verdict is
//! needed by the persistence decision, so the walk stops at the first
//! change.
//!
//! ## Responsibilities
//!
//! - Walk two output snapshot sets and report file-level changes to a visitor
//! - Answer "did any tracked output change?"
//!
//! ## Non-Responsibilities
//!
//! - Producing human-readable diffs
//! - Hashing files (fingerprints arrive precomputed)

pub mod detector;
pub mod output_changes;
pub mod visitor;

pub use detector::has_any_output_changes;
pub use output_changes::OutputFileChanges;
pub use visitor::{ChangeDetectorVisitor, ChangeKind, ChangeVisitor, FileChange};
