//! Incremental execution state captured before a run and loaded from history.

use crate::model::execution::OriginMetadata;
use crate::model::fingerprint::FileCollectionFingerprint;
use crate::model::record::HistoryRecord;
use crate::model::snapshot::OutputSnapshotSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies the code that implements a unit of work.
///
/// `implementation_hash` is `None` when the implementation could not be
/// fingerprinted (for example, code loaded from an unknown location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationSnapshot {
    pub type_name: String,
    pub implementation_hash: Option<String>,
}

impl ImplementationSnapshot {
    pub fn new(type_name: impl Into<String>, implementation_hash: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            implementation_hash,
        }
    }
}

/// State captured before the work ran.
///
/// Present only when incremental tracking was set up for the execution;
/// without it no history record can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeExecutionState {
    pub implementation: ImplementationSnapshot,
    pub additional_implementations: Vec<ImplementationSnapshot>,
    /// Input property name to value fingerprint
    pub input_properties: BTreeMap<String, String>,
    pub input_file_properties: BTreeMap<String, FileCollectionFingerprint>,
}

/// State recorded by the last stored execution of the same identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterPreviousExecutionState {
    pub origin_metadata: OriginMetadata,
    pub implementation: ImplementationSnapshot,
    pub additional_implementations: Vec<ImplementationSnapshot>,
    pub input_properties: BTreeMap<String, String>,
    pub input_file_properties: BTreeMap<String, FileCollectionFingerprint>,
    pub output_file_properties: OutputSnapshotSet,
    pub successful: bool,
}

impl From<HistoryRecord> for AfterPreviousExecutionState {
    fn from(record: HistoryRecord) -> Self {
        Self {
            origin_metadata: record.origin_metadata,
            implementation: record.implementation,
            additional_implementations: record.additional_implementations,
            input_properties: record.input_properties,
            input_file_properties: record.input_file_properties,
            output_file_properties: record.output_file_properties,
            successful: record.successful,
        }
    }
}
