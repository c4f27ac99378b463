//! Store location configuration

use std::path::{Path, PathBuf};

/// Directory used when no location is configured
pub const DEFAULT_STATE_DIR: &str = ".exechist";

/// Where the history database and its content-addressed blobs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub cas_root: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>, cas_root: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            cas_root: cas_root.into(),
        }
    }

    /// `<dir>/history.db` and `<dir>/cas`
    pub fn under(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("history.db"), dir.join("cas"))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::under(DEFAULT_STATE_DIR)
    }
}
