//! Domain models (fingerprints, snapshot sets, execution state, history records)

pub mod execution;
pub mod fingerprint;
pub mod record;
pub mod snapshot;
pub mod state;

pub use execution::{ExecutionOutcome, ExecutionResult, OriginMetadata};
pub use fingerprint::{FileCollectionFingerprint, FileSystemLocationFingerprint, FileType};
pub use record::{HistoryRecord, WorkIdentity};
pub use snapshot::OutputSnapshotSet;
pub use state::{AfterPreviousExecutionState, BeforeExecutionState, ImplementationSnapshot};
