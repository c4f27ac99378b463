#![allow(clippy::unwrap_used, clippy::expect_used)]

use exechist_core::digest::hash_str;
use exechist_core::errors::ExErrorKind;
use exechist_core::model::{
    BeforeExecutionState, ExecutionOutcome, ExecutionResult, FileCollectionFingerprint,
    ImplementationSnapshot, OriginMetadata, OutputSnapshotSet, WorkIdentity,
};
use exechist_core::steps::DefaultIncrementalContext;
use exechist_core_types::BuildInvocationId;
use exechist_engine::commands::{check_output, list_history, remove_history, show_history};
use exechist_engine::{execute_incrementally, Stores};
use exechist_store::StoreConfig;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn seed(stores: &Stores, identity: &str, output_path: &str) {
    let result = ExecutionResult::new(
        ExecutionOutcome::Success,
        OutputSnapshotSet::new().with(
            "out",
            FileCollectionFingerprint::single_file(output_path, hash_str(output_path)).unwrap(),
        ),
        OriginMetadata::new(BuildInvocationId::new(), 5),
    );
    let before = BeforeExecutionState {
        implementation: ImplementationSnapshot::new("Exec", None),
        additional_implementations: Vec::new(),
        input_properties: BTreeMap::new(),
        input_file_properties: BTreeMap::new(),
    };
    execute_incrementally(
        Arc::new(stores.work(WorkIdentity::new(identity).unwrap())),
        Some(before),
        move |_: &DefaultIncrementalContext| Ok(result.clone()),
        stores.output_files(),
    )
    .unwrap();
}

#[test]
fn test_show_list_remove() {
    let dir = TempDir::new().unwrap();
    let stores = Stores::open(&StoreConfig::under(dir.path())).unwrap();
    seed(&stores, ":a", "/ws/a/out.txt");
    seed(&stores, ":b", "/ws/b/out.txt");
    let a = WorkIdentity::new(":a").unwrap();

    assert_eq!(show_history(&stores, &a).unwrap().identity, a);
    assert_eq!(list_history(&stores).unwrap().len(), 2);

    assert!(remove_history(&stores, &a).unwrap());
    assert!(!remove_history(&stores, &a).unwrap());

    let err = show_history(&stores, &a).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(list_history(&stores).unwrap().len(), 1);
}

#[test]
fn test_check_output() {
    let dir = TempDir::new().unwrap();
    let stores = Stores::open(&StoreConfig::under(dir.path())).unwrap();
    seed(&stores, ":gen", "/ws/gen/out");

    let root = check_output(&stores, Path::new("/ws/gen/out")).unwrap();
    assert!(root.generated_by_tool);
    assert!(root.contains_generated_files);

    let parent = check_output(&stores, Path::new("/ws/gen")).unwrap();
    assert!(!parent.generated_by_tool);
    assert!(parent.contains_generated_files);

    let unrelated = check_output(&stores, Path::new("/ws/src")).unwrap();
    assert!(!unrelated.generated_by_tool);
    assert!(!unrelated.contains_generated_files);
}
