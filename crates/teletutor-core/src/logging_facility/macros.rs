//! Operation boundary macros
//!
//! A session operation emits one `start` event and then either `end` or
//! `end_error`. All three share the `component`/`op`/`event` prefix built by
//! `__log_op_event!`; extra `key = value` fields are passed through as-is.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:expr, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::event!(
            $level,
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// `start` event at info level
///
/// ```
/// # use teletutor_core::log_op_start;
/// log_op_start!("mark_attendance");
/// log_op_start!("mark_attendance", request_id = "r-1", command = "mark_attendance");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            tracing::Level::INFO,
            $op,
            teletutor_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// `end` event at info level; `duration_ms` is mandatory
///
/// ```
/// # use teletutor_core::log_op_end;
/// log_op_end!("delete_student", duration_ms = 0_u64, store_len = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            tracing::Level::INFO,
            $op,
            teletutor_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// `end_error` event at error level
///
/// `$err` goes through `Into<ExError>`. Only its kind and code are logged;
/// messages can name students.
///
/// ```
/// # use teletutor_core::{log_op_error, errors::TeletutorError};
/// let err = TeletutorError::DuplicateStudent { student_number: "A1234567X".to_string() };
/// log_op_error!("add_student", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            tracing::Level::ERROR,
            $op,
            teletutor_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
