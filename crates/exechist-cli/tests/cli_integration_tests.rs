//! CLI integration tests
//!
//! Seed history through the engine, then drive the `exechist` binary
//! against the same database.

use exechist_core::digest::hash_str;
use exechist_core::model::{
    BeforeExecutionState, ExecutionOutcome, ExecutionResult, FileCollectionFingerprint,
    ImplementationSnapshot, OriginMetadata, OutputSnapshotSet, WorkIdentity,
};
use exechist_core::steps::DefaultIncrementalContext;
use exechist_core_types::BuildInvocationId;
use exechist_engine::{execute_incrementally, Stores};
use exechist_store::StoreConfig;
use std::collections::BTreeMap;
use std::process::{Command, Output};
use std::sync::Arc;
use tempfile::TempDir;

fn seed(config: &StoreConfig, identity: &str, outcome: ExecutionOutcome) {
    let stores = Stores::open(config).unwrap();
    let result = ExecutionResult::new(
        outcome,
        OutputSnapshotSet::new().with(
            "bin",
            FileCollectionFingerprint::single_file("/ws/target/app", hash_str("app")).unwrap(),
        ),
        OriginMetadata::new(BuildInvocationId::from_string("build-42".to_string()), 75),
    );
    let before = BeforeExecutionState {
        implementation: ImplementationSnapshot::new("Link", Some(hash_str("ld"))),
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

fn exechist(config: &StoreConfig, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_exechist"))
        .args(args)
        .arg("--db")
        .arg(&config.db_path)
        .arg("--cas")
        .arg(&config.cas_root)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_history_list_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::under(temp_dir.path());
    seed(&config, ":app:link", ExecutionOutcome::Success);
    seed(&config, ":app:test", ExecutionOutcome::failure("1 failing"));

    let list = exechist(&config, &["history", "list"]);
    assert!(
        list.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&list.stderr)
    );
    let stdout = String::from_utf8_lossy(&list.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(":app:link\tsuccess\t75ms\tbuild-42"));
    assert!(lines[1].starts_with(":app:test\tfailed"));

    let show = exechist(&config, &["history", "show", ":app:link"]);
    assert!(show.status.success());
    let record: serde_json::Value = serde_json::from_slice(&show.stdout).unwrap();
    assert_eq!(record["identity"], ":app:link");
    assert_eq!(record["successful"], true);
}

#[test]
fn test_history_show_unknown_identity_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::under(temp_dir.path());

    let output = exechist(&config, &["history", "show", ":missing"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_history_remove() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::under(temp_dir.path());
    seed(&config, ":app:link", ExecutionOutcome::Success);

    let removed = exechist(&config, &["history", "remove", ":app:link"]);
    assert!(removed.status.success());
    assert!(String::from_utf8_lossy(&removed.stdout).contains("Removed history"));

    let list = exechist(&config, &["history", "list"]);
    assert!(String::from_utf8_lossy(&list.stdout).contains("No execution history stored"));
}

#[test]
fn test_outputs_check() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::under(temp_dir.path());
    seed(&config, ":app:link", ExecutionOutcome::Success);

    let output = exechist(&config, &["outputs", "check", "/ws/target"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generated_by_tool: false"));
    assert!(stdout.contains("contains_generated_files: true"));
}
