//! Structured logging for exechist
//!
//! The binary calls [`init`] once with a [`Profile`]. Library code logs
//! operation boundaries through `log_op_start!`, `log_op_end!` and
//! `log_op_error!`, and logs decisions with plain `tracing` events tagged
//! with the work identity. Tests install [`init_test_capture`] instead and
//! assert on what was recorded.
//!
//! ```rust
//! use exechist_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
