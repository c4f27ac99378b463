#![allow(dead_code)]

use exechist_core::digest::hash_str;
use exechist_core::errors::{ExError, ExErrorKind, Result};
use exechist_core::history::ExecutionHistoryStore;
use exechist_core::model::{
    AfterPreviousExecutionState, BeforeExecutionState, ExecutionOutcome, ExecutionResult,
    FileCollectionFingerprint, HistoryRecord, ImplementationSnapshot, OriginMetadata,
    OutputSnapshotSet, WorkIdentity,
};
use exechist_core::outputs::OutputFilesRepository;
use exechist_core::steps::UnitOfWork;
use exechist_core_types::BuildInvocationId;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// History store that records every `store` call and can be told to fail
#[derive(Default)]
pub struct RecordingHistoryStore {
    stored: Mutex<Vec<HistoryRecord>>,
    fail_with: Option<ExErrorKind>,
}

impl RecordingHistoryStore {
    pub fn failing(kind: ExErrorKind) -> Self {
        Self {
            stored: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    pub fn stored(&self) -> Vec<HistoryRecord> {
        self.stored.lock().unwrap().clone()
    }
}

impl ExecutionHistoryStore for RecordingHistoryStore {
    fn load(&self, _identity: &WorkIdentity) -> Result<Option<AfterPreviousExecutionState>> {
        Ok(None)
    }

    fn store(&self, record: HistoryRecord) -> Result<()> {
        if let Some(kind) = self.fail_with {
            return Err(ExError::new(kind)
                .with_op("store")
                .with_message("history store unavailable"));
        }
        self.stored.lock().unwrap().push(record);
        Ok(())
    }

    fn remove(&self, _identity: &WorkIdentity) -> Result<()> {
        Ok(())
    }
}

/// Output registry that records every `record_outputs` call
#[derive(Default)]
pub struct RecordingOutputFiles {
    calls: Mutex<Vec<Vec<FileCollectionFingerprint>>>,
    fail_with: Option<ExErrorKind>,
}

impl RecordingOutputFiles {
    pub fn failing(kind: ExErrorKind) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    pub fn calls(&self) -> Vec<Vec<FileCollectionFingerprint>> {
        self.calls.lock().unwrap().clone()
    }
}

impl OutputFilesRepository for RecordingOutputFiles {
    fn record_outputs(&self, outputs: &[&FileCollectionFingerprint]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(outputs.iter().map(|fingerprint| (*fingerprint).clone()).collect());
        match self.fail_with {
            Some(kind) => Err(ExError::new(kind)
                .with_op("record_outputs")
                .with_message("registry unavailable")),
            None => Ok(()),
        }
    }

    fn is_generated_by_tool(&self, _path: &Path) -> Result<bool> {
        Ok(false)
    }

    fn contains_files_generated_by_tool(&self, _path: &Path) -> Result<bool> {
        Ok(false)
    }
}

pub struct TestWork {
    pub identity: WorkIdentity,
    pub history: RecordingHistoryStore,
}

impl TestWork {
    pub fn new(identity: &str) -> Arc<Self> {
        Self::with_history(identity, RecordingHistoryStore::default())
    }

    pub fn with_history(identity: &str, history: RecordingHistoryStore) -> Arc<Self> {
        Arc::new(Self {
            identity: WorkIdentity::new(identity).unwrap(),
            history,
        })
    }
}

impl UnitOfWork for TestWork {
    fn identity(&self) -> &WorkIdentity {
        &self.identity
    }

    fn execution_history_store(&self) -> &dyn ExecutionHistoryStore {
        &self.history
    }
}

pub fn before_state() -> BeforeExecutionState {
    let mut input_properties = BTreeMap::new();
    input_properties.insert("release".to_string(), hash_str("17"));
    let mut input_file_properties = BTreeMap::new();
    input_file_properties.insert(
        "sources".to_string(),
        FileCollectionFingerprint::single_file("/ws/src/Main.java", hash_str("main")).unwrap(),
    );
    BeforeExecutionState {
        implementation: ImplementationSnapshot::new("JavaCompile", Some(hash_str("javac"))),
        additional_implementations: vec![ImplementationSnapshot::new(
            "DoLastAction",
            Some(hash_str("action")),
        )],
        input_properties,
        input_file_properties,
    }
}

/// Output set with a single `classes` property whose content is `content`
pub fn outputs(content: &str) -> OutputSnapshotSet {
    OutputSnapshotSet::new().with(
        "classes",
        FileCollectionFingerprint::single_file("/ws/build/classes/Main.class", hash_str(content))
            .unwrap(),
    )
}

pub fn result(outcome: ExecutionOutcome, final_outputs: OutputSnapshotSet) -> ExecutionResult {
    ExecutionResult::new(
        outcome,
        final_outputs,
        OriginMetadata::new(BuildInvocationId::new(), 250),
    )
}

/// State as loaded from a previous successful execution with `final_outputs`
pub fn previous_state(identity: &WorkIdentity, final_outputs: OutputSnapshotSet) -> AfterPreviousExecutionState {
    HistoryRecord::from_execution(
        identity.clone(),
        &before_state(),
        &result(ExecutionOutcome::Success, final_outputs),
    )
    .into()
}
