//! Shard layout for CAS blobs
//!
//! Blobs live under a subdirectory named after the first 2 hex characters
//! of their digest so no single directory grows unbounded.

use std::path::{Path, PathBuf};

/// Blob location for a digest: `<root>/<first 2 chars>/<digest>.<ext>`
pub fn shard_path(root: &Path, digest: &str, extension: &str) -> PathBuf {
    let shard = digest.get(..2).unwrap_or(digest);
    root.join(shard).join(format!("{}.{}", digest, extension))
}
