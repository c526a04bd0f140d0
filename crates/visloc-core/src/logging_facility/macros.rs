//! Lifecycle events for requester operations
//!
//! One call to a requester operation emits `start`, then exactly one of
//! `end` or `end_error`. Every event carries `component`, `op` and `event`;
//! the closing events add `duration_ms`, and `end_error` adds `err_kind` and
//! `err_code` taken from the `ExError`. Any further `key = value` pairs are
//! passed through to `tracing` unchanged.

/// Emit the `start` event of `op`
///
/// ```
/// # use visloc_core::log_op_start;
/// log_op_start!("clear_commands");
/// log_op_start!("locate", key = "vision_commands", thing = "ball");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = visloc_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Emit the `end` event of `op`; `duration_ms` is required
///
/// ```
/// # use visloc_core::log_op_end;
/// log_op_end!("pending_commands", duration_ms = 0_u64, queue_len = 4_u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = visloc_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Emit the `end_error` event of `op` at error level
///
/// `$err` is anything convertible into `ExError`, so a `VisionError` works
/// as well.
///
/// ```
/// # use visloc_core::log_op_error;
/// use visloc_core::errors::VisionError;
/// let err = VisionError::MalformedLocation {
///     key: "vision_location".to_string(),
///     reason: "expected value".to_string(),
/// };
/// log_op_error!("get_location", err, duration_ms = 1_u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = visloc_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)*)?
        );
    }};
}
