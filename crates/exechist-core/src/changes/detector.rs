use crate::changes::output_changes::OutputFileChanges;
use crate::changes::visitor::ChangeDetectorVisitor;
use crate::model::OutputSnapshotSet;

/// Whether any tracked output changed between two executions.
///
/// A differing set of property names counts as a change without looking at
/// content. Otherwise the locations of each property are compared by
/// content, stopping at the first difference. Empty against empty is no
/// change.
pub fn has_any_output_changes(previous: &OutputSnapshotSet, current: &OutputSnapshotSet) -> bool {
    if !previous.has_same_properties(current) {
        return true;
    }
    let mut visitor = ChangeDetectorVisitor::new();
    OutputFileChanges::new(previous, current).accept(&mut visitor);
    visitor.has_any_changes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::hash_str;
    use crate::model::FileCollectionFingerprint;
    use proptest::prelude::*;

    fn file(path: &str, content: &str) -> FileCollectionFingerprint {
        FileCollectionFingerprint::single_file(path, hash_str(content)).unwrap()
    }

    #[test]
    fn test_empty_vs_empty_is_unchanged() {
        assert!(!has_any_output_changes(
            &OutputSnapshotSet::new(),
            &OutputSnapshotSet::new()
        ));
    }

    #[test]
    fn test_same_content_is_unchanged() {
        let previous = OutputSnapshotSet::new().with("out", file("/b/out", "h1"));
        let current = OutputSnapshotSet::new().with("out", file("/b/out", "h1"));
        assert!(!has_any_output_changes(&previous, &current));
    }

    #[test]
    fn test_content_change_is_detected() {
        let previous = OutputSnapshotSet::new().with("out", file("/b/out", "h1"));
        let current = OutputSnapshotSet::new().with("out", file("/b/out", "h2"));
        assert!(has_any_output_changes(&previous, &current));
    }

    #[test]
    fn test_added_property_is_a_change_even_if_empty() {
        let previous = OutputSnapshotSet::new().with("out", file("/b/out", "h1"));
        let current = OutputSnapshotSet::new()
            .with("out", file("/b/out", "h1"))
            .with("extra", FileCollectionFingerprint::empty());
        assert!(has_any_output_changes(&previous, &current));
    }

    #[test]
    fn test_removed_property_is_a_change() {
        let previous = OutputSnapshotSet::new()
            .with("a", FileCollectionFingerprint::empty())
            .with("b", FileCollectionFingerprint::empty());
        let current = OutputSnapshotSet::new().with("a", FileCollectionFingerprint::empty());
        assert!(has_any_output_changes(&previous, &current));
    }

    #[test]
    fn test_file_moved_within_property_is_a_change() {
        let previous = OutputSnapshotSet::new().with("out", file("/b/one", "same"));
        let current = OutputSnapshotSet::new().with("out", file("/b/two", "same"));
        assert!(has_any_output_changes(&previous, &current));
    }

    fn roots_only(root: &str, hash: &str) -> FileCollectionFingerprint {
        FileCollectionFingerprint::new(
            std::collections::BTreeMap::new(),
            std::collections::BTreeMap::from([(root.to_string(), hash.to_string())]),
        )
    }

    #[test]
    fn test_moved_output_root_is_a_change() {
        let hash = hash_str("tree");
        let previous = OutputSnapshotSet::new().with("out", roots_only("/ws/out_a", &hash));
        let current = OutputSnapshotSet::new().with("out", roots_only("/ws/out_b", &hash));

        assert!(has_any_output_changes(&previous, &current));
    }

    #[test]
    fn test_root_hash_change_without_locations_is_a_change() {
        let previous = OutputSnapshotSet::new().with("out", roots_only("/ws/out", &hash_str("1")));
        let current = OutputSnapshotSet::new().with("out", roots_only("/ws/out", &hash_str("2")));

        assert!(has_any_output_changes(&previous, &current));
        assert!(!has_any_output_changes(&previous, &previous.clone()));
    }

    fn snapshot_set(entries: &std::collections::BTreeMap<String, String>) -> OutputSnapshotSet {
        entries
            .iter()
            .map(|(name, content)| (name.clone(), file(&format!("/out/{}", name), content)))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_differing_key_sets_always_change(
            common in proptest::collection::btree_map("[a-e]{1,3}", "[a-z]{1,4}", 0..5),
            extra_name in "[x-z]{1,3}",
        ) {
            let previous = snapshot_set(&common);
            let mut extended = common.clone();
            extended.insert(extra_name, "v".to_string());
            let current = snapshot_set(&extended);

            prop_assert!(has_any_output_changes(&previous, &current));
            prop_assert!(has_any_output_changes(&current, &previous));
        }

        #[test]
        fn prop_verdict_matches_content_equality(
            previous in proptest::collection::btree_map("[a-e]{1,3}", "[a-c]{1,2}", 0..5),
            mutate in any::<bool>(),
        ) {
            let mut current = previous.clone();
            let changed = mutate && !current.is_empty();
            if changed {
                if let Some(value) = current.values_mut().next() {
                    value.push('!');
                }
            }

            prop_assert_eq!(
                has_any_output_changes(&snapshot_set(&previous), &snapshot_set(&current)),
                changed
            );
        }
    }
}
