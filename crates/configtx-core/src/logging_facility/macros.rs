//! Operation boundary macros
//!
//! Each macro stamps `component`, `op` and `event`; extra `key = value`
//! fields are passed through to `tracing` untouched.

/// Log the start of an operation
///
/// ```
/// # use configtx_core::log_op_start;
/// log_op_start!("compute_update");
/// log_op_start!("compute_update", channel_id = "mychannel");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use configtx_core::log_op_end;
/// log_op_end!("compute_update", duration_ms = 3);
/// log_op_end!("compute_update", duration_ms = 3, channel_id = "mychannel");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are recorded as `err.kind` and `err.code`.
///
/// ```
/// # use configtx_core::log_op_error;
/// # use configtx_core::errors::ConfigError;
/// log_op_error!("compute_update", ConfigError::EmptyChannelId, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            $($($field)*)?
        )
    }};
}
