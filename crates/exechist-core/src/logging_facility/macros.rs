//! Operation boundary macros
//!
//! Every operation logs `start` on entry and exactly one of `end` or
//! `end_error` on exit. All three carry `component` (the calling module)
//! plus `op` and `event`; extra fields are passed through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = exechist_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Entry into an operation
///
/// ```
/// # use exechist_core::log_op_start;
/// log_op_start!("store_snapshots");
/// log_op_start!("store_snapshots", identity = ":compileJava");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Successful exit, `duration_ms` first
///
/// ```
/// # use exechist_core::log_op_end;
/// log_op_end!("store_snapshots", duration_ms = 3);
/// log_op_end!("store_snapshots", duration_ms = 3, output_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Failed exit
///
/// Anything convertible into `ExError` is accepted, so `err.kind` and
/// `err.code` are always filled in.
///
/// ```
/// # use exechist_core::log_op_error;
/// # use exechist_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
/// log_op_error!("store_history", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
