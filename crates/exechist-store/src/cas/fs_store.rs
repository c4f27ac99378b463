//! Filesystem-based Content-Addressable Storage

use crate::cas::atomic::atomic_write;
use crate::cas::sharding::shard_path;
use crate::errors::{cas_collision, cas_corrupt, cas_missing, io_error, Result};
use exechist_core::digest::hash_bytes;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Filesystem-based CAS store
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new CAS store at the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write content and return its SHA-256 digest.
    ///
    /// Writing the same content twice is a no-op. Finding different bytes
    /// under the same digest is reported as a collision.
    pub fn write(&self, content: &[u8], extension: &str) -> Result<String> {
        let digest = hash_bytes(content);
        let target_path = shard_path(&self.root, &digest, extension);

        match fs::read(&target_path) {
            Ok(existing) if existing == content => return Ok(digest),
            Ok(_) => return Err(cas_collision(&digest)),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_error("read_cas", e)),
        }

        atomic_write(&target_path, content)?;
        Ok(digest)
    }

    /// Read the blob stored under `digest`, verifying its content.
    pub fn read(&self, digest: &str, extension: &str) -> Result<Vec<u8>> {
        let path = shard_path(&self.root, digest, extension);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(cas_missing(digest)),
            Err(e) => return Err(io_error("read_cas", e)),
        };

        let actual = hash_bytes(&content);
        if actual != digest {
            return Err(cas_corrupt(digest, &actual));
        }
        Ok(content)
    }
}
