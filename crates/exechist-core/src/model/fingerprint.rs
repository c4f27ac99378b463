//! File collection fingerprints.
//!
//! A fingerprint summarizes the state of the files bound to one input or
//! output property. Hashing and filesystem walking happen upstream; this
//! module only models the immutable result and compares it.

use crate::digest::{hash_canonical_json, hash_str, is_sha256_hex};
use crate::errors::HistoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of filesystem entry observed at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    RegularFile,
    Directory,
    Missing,
}

/// Fingerprint of a single filesystem location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemLocationFingerprint {
    /// Path normalized relative to the collection root
    pub normalized_path: String,
    pub file_type: FileType,
    /// Hex SHA-256 of the content, or a fixed signature for directories and missing files
    pub content_hash: String,
}

impl FileSystemLocationFingerprint {
    /// Fingerprint a regular file with a precomputed content hash.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidContentHash` unless `content_hash` is a
    /// lowercase hex SHA-256 digest.
    pub fn regular_file(
        normalized_path: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Result<Self, HistoryError> {
        let normalized_path = normalized_path.into();
        let content_hash = content_hash.into();
        if !is_sha256_hex(&content_hash) {
            return Err(HistoryError::InvalidContentHash {
                path: normalized_path,
                hash: content_hash,
            });
        }
        Ok(Self {
            normalized_path,
            file_type: FileType::RegularFile,
            content_hash,
        })
    }

    /// Fingerprint a directory; directories carry a fixed signature.
    pub fn directory(normalized_path: impl Into<String>) -> Self {
        Self {
            normalized_path: normalized_path.into(),
            file_type: FileType::Directory,
            content_hash: directory_signature(),
        }
    }

    /// Fingerprint a location where nothing exists.
    pub fn missing(normalized_path: impl Into<String>) -> Self {
        Self {
            normalized_path: normalized_path.into(),
            file_type: FileType::Missing,
            content_hash: missing_file_signature(),
        }
    }

    /// Content-level equality: same kind of entry with the same hash.
    ///
    /// The normalized path is ignored; output locations are compared by
    /// absolute path at the collection level.
    pub fn has_same_content(&self, other: &Self) -> bool {
        self.file_type == other.file_type && self.content_hash == other.content_hash
    }
}

fn directory_signature() -> String {
    hash_str("DIRECTORY")
}

fn missing_file_signature() -> String {
    hash_str("MISSING_FILE")
}

/// Fingerprint of every location bound to one property.
///
/// Entries are keyed by absolute path. `root_hashes` maps each root the
/// property declared (a file or a directory) to its hash; the roots are
/// what the output registry records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCollectionFingerprint {
    fingerprints: BTreeMap<String, FileSystemLocationFingerprint>,
    root_hashes: BTreeMap<String, String>,
}

impl FileCollectionFingerprint {
    pub fn new(
        fingerprints: BTreeMap<String, FileSystemLocationFingerprint>,
        root_hashes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            fingerprints,
            root_hashes,
        }
    }

    /// An empty collection (no files bound to the property)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A collection rooted at a single regular file.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidContentHash` for a malformed hash.
    pub fn single_file(
        absolute_path: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Result<Self, HistoryError> {
        let absolute_path = absolute_path.into();
        let fingerprint = FileSystemLocationFingerprint::regular_file(
            file_name(&absolute_path),
            content_hash,
        )?;
        let mut root_hashes = BTreeMap::new();
        root_hashes.insert(absolute_path.clone(), fingerprint.content_hash.clone());
        let mut fingerprints = BTreeMap::new();
        fingerprints.insert(absolute_path, fingerprint);
        Ok(Self::new(fingerprints, root_hashes))
    }

    /// Per-location fingerprints keyed by absolute path
    pub fn fingerprints(&self) -> &BTreeMap<String, FileSystemLocationFingerprint> {
        &self.fingerprints
    }

    /// Root path to root hash
    pub fn root_hashes(&self) -> &BTreeMap<String, String> {
        &self.root_hashes
    }

    /// Root paths in sorted order
    pub fn root_paths(&self) -> impl Iterator<Item = &str> {
        self.root_hashes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// Content-level equality over every location and every root.
    pub fn has_same_content(&self, other: &Self) -> bool {
        self.root_hashes == other.root_hashes
            && self.fingerprints.len() == other.fingerprints.len()
            && self
                .fingerprints
                .iter()
                .zip(other.fingerprints.iter())
                .all(|((path_a, fp_a), (path_b, fp_b))| {
                    path_a == path_b && fp_a.has_same_content(fp_b)
                })
    }

    /// Deterministic digest over the per-location fingerprints.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Serialization` if JSON serialization fails.
    pub fn hash(&self) -> Result<String, HistoryError> {
        hash_canonical_json(&self.fingerprints)
    }
}

fn file_name(absolute_path: &str) -> &str {
    absolute_path
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(absolute_path)
}
