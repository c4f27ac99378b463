use crate::changes::visitor::{ChangeKind, ChangeVisitor, FileChange};
use crate::model::{FileCollectionFingerprint, OutputSnapshotSet};

/// File-level changes between a previous and a current output snapshot set.
///
/// Locations are matched by absolute path within each property. A root
/// without a location entry of its own is compared by its root hash. A
/// property present on only one side contributes all of its locations and
/// roots as added or removed.
pub struct OutputFileChanges<'a> {
    previous: &'a OutputSnapshotSet,
    current: &'a OutputSnapshotSet,
}

impl<'a> OutputFileChanges<'a> {
    pub fn new(previous: &'a OutputSnapshotSet, current: &'a OutputSnapshotSet) -> Self {
        Self { previous, current }
    }

    /// Walk every change in property-name then path order.
    ///
    /// Returns `true` if the walk completed, `false` if the visitor stopped it.
    pub fn accept(&self, visitor: &mut dyn ChangeVisitor) -> bool {
        for (property_name, previous) in self.previous {
            let completed = match self.current.get(property_name) {
                Some(current) => visit_property(property_name, previous, current, visitor),
                None => visit_all(property_name, previous, ChangeKind::Removed, visitor),
            };
            if !completed {
                return false;
            }
        }

        for (property_name, current) in self.current {
            if self.previous.get(property_name).is_none()
                && !visit_all(property_name, current, ChangeKind::Added, visitor)
            {
                return false;
            }
        }

        true
    }
}

fn visit_property(
    property_name: &str,
    previous: &FileCollectionFingerprint,
    current: &FileCollectionFingerprint,
    visitor: &mut dyn ChangeVisitor,
) -> bool {
    if previous.has_same_content(current) {
        return true;
    }

    for (path, previous_fingerprint) in previous.fingerprints() {
        let kind = match current.fingerprints().get(path) {
            None => ChangeKind::Removed,
            Some(current_fingerprint) if !previous_fingerprint.has_same_content(current_fingerprint) => {
                ChangeKind::Modified
            }
            Some(_) => continue,
        };
        if !visit(visitor, property_name, path, kind) {
            return false;
        }
    }

    for path in current.fingerprints().keys() {
        if !previous.fingerprints().contains_key(path)
            && !visit(visitor, property_name, path, ChangeKind::Added)
        {
            return false;
        }
    }

    visit_roots(property_name, previous, current, visitor)
}

/// Roots not covered by a location on either side.
fn visit_roots(
    property_name: &str,
    previous: &FileCollectionFingerprint,
    current: &FileCollectionFingerprint,
    visitor: &mut dyn ChangeVisitor,
) -> bool {
    let covered = |path: &String| {
        previous.fingerprints().contains_key(path) || current.fingerprints().contains_key(path)
    };

    for (path, previous_hash) in previous.root_hashes() {
        if covered(path) {
            continue;
        }
        let kind = match current.root_hashes().get(path) {
            None => ChangeKind::Removed,
            Some(current_hash) if current_hash != previous_hash => ChangeKind::Modified,
            Some(_) => continue,
        };
        if !visit(visitor, property_name, path, kind) {
            return false;
        }
    }

    for path in current.root_hashes().keys() {
        if !covered(path)
            && !previous.root_hashes().contains_key(path)
            && !visit(visitor, property_name, path, ChangeKind::Added)
        {
            return false;
        }
    }

    true
}

fn visit_all(
    property_name: &str,
    collection: &FileCollectionFingerprint,
    kind: ChangeKind,
    visitor: &mut dyn ChangeVisitor,
) -> bool {
    let uncovered_roots = collection
        .root_paths()
        .filter(|root| !collection.fingerprints().contains_key(*root));
    collection
        .fingerprints()
        .keys()
        .map(String::as_str)
        .chain(uncovered_roots)
        .all(|path| visit(visitor, property_name, path, kind))
}

fn visit(visitor: &mut dyn ChangeVisitor, property_name: &str, path: &str, kind: ChangeKind) -> bool {
    visitor.visit_change(&FileChange {
        property_name,
        path,
        kind,
    })
}
