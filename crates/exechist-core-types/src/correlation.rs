//! Correlation identifiers for build invocations and executions
//!
//! A build invocation groups every unit of work executed by one run of the
//! surrounding build tool. An execution identifies a single run of a single
//! unit of work inside that invocation. Both are recorded as origin
//! metadata and threaded through structured log events.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh, time-ordered (UUIDv7) identifier
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Wrap an identifier read back from storage or supplied by a caller
            pub fn from_string(s: String) -> Self {
                Self(s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifier of one build invocation (one run of the build tool)
    BuildInvocationId
);

correlation_id!(
    /// Identifier of a single execution of a unit of work
    ExecutionId
);
