use crate::errors::HistoryError;
use crate::model::execution::{ExecutionResult, OriginMetadata};
use crate::model::fingerprint::FileCollectionFingerprint;
use crate::model::snapshot::OutputSnapshotSet;
use crate::model::state::{BeforeExecutionState, ImplementationSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable key of a unit of work across executions (e.g. a task path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkIdentity(String);

impl WorkIdentity {
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidIdentity` for an empty or blank identity.
    pub fn new(identity: impl Into<String>) -> Result<Self, HistoryError> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(HistoryError::InvalidIdentity {
                reason: "identity cannot be empty".to_string(),
            });
        }
        Ok(Self(identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persisted unit of execution history.
///
/// One record per identity; storing a new record replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub identity: WorkIdentity,
    pub origin_metadata: OriginMetadata,
    pub implementation: ImplementationSnapshot,
    pub additional_implementations: Vec<ImplementationSnapshot>,
    pub input_properties: BTreeMap<String, String>,
    pub input_file_properties: BTreeMap<String, FileCollectionFingerprint>,
    pub output_file_properties: OutputSnapshotSet,
    pub successful: bool,
}

impl HistoryRecord {
    /// Build the record for an execution from the state captured before it ran.
    pub fn from_execution(
        identity: WorkIdentity,
        before: &BeforeExecutionState,
        result: &ExecutionResult,
    ) -> Self {
        Self {
            identity,
            origin_metadata: result.origin_metadata.clone(),
            implementation: before.implementation.clone(),
            additional_implementations: before.additional_implementations.clone(),
            input_properties: before.input_properties.clone(),
            input_file_properties: before.input_file_properties.clone(),
            output_file_properties: result.final_outputs.clone(),
            successful: result.outcome.is_successful(),
        }
    }
}
