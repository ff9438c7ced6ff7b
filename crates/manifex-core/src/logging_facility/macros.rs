//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log pipeline
//! operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use manifex_core::log_op_start;
/// log_op_start!("run_publish");
/// log_op_start!("run_publish", dir = "/tmp/pkg");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use manifex_core::log_op_end;
/// log_op_end!("run_publish", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use manifex_core::log_op_error;
/// # use manifex_core::errors::{MxError, MxErrorKind};
/// let err = MxError::new(MxErrorKind::Io).with_op("run_publish");
/// log_op_error!("run_publish", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let mx_err: &$crate::errors::MxError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?mx_err.kind(),
            err_code = mx_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let mx_err: &$crate::errors::MxError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = manifex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?mx_err.kind(),
            err_code = mx_err.code(),
            $($field)*
        );
    }};
}
