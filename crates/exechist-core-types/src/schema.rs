//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across the core, the store
//! backends and the engine.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_EXECUTION_ID: &str = "execution_id";

// Entity identifiers
pub const FIELD_IDENTITY: &str = "identity";

// Decision outcome
pub const FIELD_SUCCESSFUL: &str = "successful";
pub const FIELD_STORED: &str = "stored";
pub const FIELD_OUTPUT_COUNT: &str = "output_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
