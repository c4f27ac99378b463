//! Registry of filesystem locations produced by the build tool.
//!
//! Every execution reports its final output roots here, whether or not its
//! history was stored. Cleanup and overlap detection later ask the registry
//! whether a location is tool-owned.

use crate::errors::{HistoryError, Result};
use crate::model::FileCollectionFingerprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// How a location relates to recorded outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMark {
    /// An ancestor directory of an output root
    Parent,
    /// An output root itself
    Output,
}

impl OutputMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMark::Parent => "parent",
            OutputMark::Output => "output",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "parent" => Some(OutputMark::Parent),
            "output" => Some(OutputMark::Output),
            _ => None,
        }
    }
}

/// Compute the marks implied by a set of output fingerprints.
///
/// Each root path is marked `Output` and each of its ancestors `Parent`.
/// An `Output` mark always wins over a `Parent` mark for the same path.
pub fn output_marks(outputs: &[&FileCollectionFingerprint]) -> BTreeMap<PathBuf, OutputMark> {
    let mut marks = BTreeMap::new();
    for root in outputs.iter().flat_map(|fingerprint| fingerprint.root_paths()) {
        let root = Path::new(root);
        merge_mark(&mut marks, root.to_path_buf(), OutputMark::Output);
        for ancestor in root.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            merge_mark(&mut marks, ancestor.to_path_buf(), OutputMark::Parent);
        }
    }
    marks
}

fn merge_mark(marks: &mut BTreeMap<PathBuf, OutputMark>, path: PathBuf, mark: OutputMark) {
    let entry = marks.entry(path).or_insert(mark);
    if mark > *entry {
        *entry = mark;
    }
}

/// The output registry contract.
///
/// Recording the same locations twice leaves the registry unchanged.
pub trait OutputFilesRepository: Send + Sync {
    /// Record the roots of the given fingerprints as tool-produced outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry could not be updated.
    fn record_outputs(&self, outputs: &[&FileCollectionFingerprint]) -> Result<()>;

    /// Whether `path` is an output root or lies inside one.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry could not be read.
    fn is_generated_by_tool(&self, path: &Path) -> Result<bool>;

    /// Whether `path` is an output root or an ancestor of one.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry could not be read.
    fn contains_files_generated_by_tool(&self, path: &Path) -> Result<bool>;
}

/// Output registry kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryOutputFilesRepository {
    marks: RwLock<BTreeMap<PathBuf, OutputMark>>,
}

impl InMemoryOutputFilesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded mark
    ///
    /// # Errors
    ///
    /// Returns a `Concurrency` error if the lock was poisoned.
    pub fn marks(&self) -> Result<BTreeMap<PathBuf, OutputMark>> {
        Ok(self.marks.read().map_err(|_| poisoned())?.clone())
    }
}

fn poisoned() -> HistoryError {
    HistoryError::LockPoisoned {
        resource: "in_memory_outputs".to_string(),
    }
}

impl OutputFilesRepository for InMemoryOutputFilesRepository {
    fn record_outputs(&self, outputs: &[&FileCollectionFingerprint]) -> Result<()> {
        let mut marks = self.marks.write().map_err(|_| poisoned())?;
        for (path, mark) in output_marks(outputs) {
            merge_mark(&mut marks, path, mark);
        }
        Ok(())
    }

    fn is_generated_by_tool(&self, path: &Path) -> Result<bool> {
        let marks = self.marks.read().map_err(|_| poisoned())?;
        Ok(path
            .ancestors()
            .any(|candidate| marks.get(candidate) == Some(&OutputMark::Output)))
    }

    fn contains_files_generated_by_tool(&self, path: &Path) -> Result<bool> {
        let marks = self.marks.read().map_err(|_| poisoned())?;
        Ok(marks.contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::hash_str;

    fn jar() -> FileCollectionFingerprint {
        FileCollectionFingerprint::single_file("/ws/app/build/libs/app.jar", hash_str("jar"))
            .unwrap()
    }

    #[test]
    fn test_output_marks_include_ancestors() {
        let jar = jar();
        let marks = output_marks(&[&jar]);

        assert_eq!(
            marks.get(Path::new("/ws/app/build/libs/app.jar")),
            Some(&OutputMark::Output)
        );
        assert_eq!(
            marks.get(Path::new("/ws/app/build")),
            Some(&OutputMark::Parent)
        );
        assert_eq!(marks.get(Path::new("/")), Some(&OutputMark::Parent));
    }

    #[test]
    fn test_output_mark_is_never_downgraded() {
        let outer = FileCollectionFingerprint::single_file("/ws/out", hash_str("a")).unwrap();
        let inner = FileCollectionFingerprint::single_file("/ws/out/nested", hash_str("b")).unwrap();

        let marks = output_marks(&[&outer, &inner]);
        assert_eq!(marks.get(Path::new("/ws/out")), Some(&OutputMark::Output));
    }

    #[test]
    fn test_is_generated_by_tool_covers_descendants() {
        let repository = InMemoryOutputFilesRepository::new();
        let classes = FileCollectionFingerprint::single_file("/ws/build/classes", hash_str("c"))
            .unwrap();
        repository.record_outputs(&[&classes]).unwrap();

        assert!(repository
            .is_generated_by_tool(Path::new("/ws/build/classes/A.class"))
            .unwrap());
        assert!(repository
            .is_generated_by_tool(Path::new("/ws/build/classes"))
            .unwrap());
        assert!(!repository.is_generated_by_tool(Path::new("/ws/build")).unwrap());
        assert!(!repository.is_generated_by_tool(Path::new("/ws/src")).unwrap());
    }

    #[test]
    fn test_contains_files_generated_by_tool() {
        let repository = InMemoryOutputFilesRepository::new();
        repository.record_outputs(&[&jar()]).unwrap();

        assert!(repository
            .contains_files_generated_by_tool(Path::new("/ws/app/build"))
            .unwrap());
        assert!(!repository
            .contains_files_generated_by_tool(Path::new("/ws/lib"))
            .unwrap());
    }

    #[test]
    fn test_recording_twice_is_idempotent() {
        let repository = InMemoryOutputFilesRepository::new();
        repository.record_outputs(&[&jar()]).unwrap();
        let first = repository.marks().unwrap();
        repository.record_outputs(&[&jar()]).unwrap();
        assert_eq!(first, repository.marks().unwrap());
    }

    #[test]
    fn test_mark_parse_round_trip() {
        for mark in [OutputMark::Parent, OutputMark::Output] {
            assert_eq!(OutputMark::parse(mark.as_str()), Some(mark));
        }
        assert_eq!(OutputMark::parse("other"), None);
    }
}
