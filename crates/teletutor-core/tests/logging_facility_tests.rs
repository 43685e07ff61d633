#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use teletutor_core::errors::TeletutorError;
use teletutor_core::logging_facility::test_capture::init_test_capture;
use teletutor_core::{log_op_end, log_op_error, log_op_start, Command, UndoOutcome};
use teletutor_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CANDIDATE_COUNT, FIELD_COMMAND,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_REQUEST_ID, FIELD_STORE_LEN, FIELD_STUDENT_NAME,
};

#[test]
fn test_log_op_end_macro_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_1";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_records_code_not_message() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    let err = TeletutorError::StudentNotFound {
        name: "Secret Person".to_string(),
        student_number: None,
    };
    log_op_error!(op_name, err, duration_ms = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("NotFound"));
    assert!(events
        .iter()
        .all(|e| e.fields.values().all(|v| !v.contains("Secret Person"))));
}

#[test]
fn test_session_execute_logs_start_and_end_with_request_id() {
    let capture = init_test_capture();
    let mut session = new_session();

    let result = session
        .execute(add_student("Logged Student", "A5550001L", "T01"))
        .unwrap();

    let request_id = result.request_id.to_string();
    let events: Vec<_> = capture
        .events_for_op("add_student")
        .into_iter()
        .filter(|e| e.field(FIELD_REQUEST_ID) == Some(request_id.as_str()))
        .collect();

    assert_eq!(events.len(), 2, "one start and one end per request");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field(FIELD_COMMAND), Some("add_student"));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_session_failure_logs_end_error_with_same_request_id() {
    let capture = init_test_capture();
    let mut session = new_session();

    let err = session
        .execute(Command::DeleteStudent {
            name: name("Nobody Here"),
            student_number: None,
        })
        .unwrap_err();

    let request_id = err.request_id().unwrap().to_string();
    let error_events = capture.count_events(|e| {
        e.op.as_deref() == Some("delete_student")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_REQUEST_ID) == Some(request_id.as_str())
    });
    assert_eq!(error_events, 1);
}

#[test]
fn test_phone_never_logged() {
    let capture = init_test_capture();
    let mut session = new_session();

    session
        .execute(teletutor_core::Command::AddStudent {
            name: name("Private Phone"),
            phone: teletutor_core::model::Phone::new("87654329").unwrap(),
            tutorial_group: teletutor_core::model::TutorialGroup::new("T01").unwrap(),
            student_number: number("A5550002P"),
        })
        .unwrap();

    assert!(capture
        .events()
        .iter()
        .all(|e| e.fields.values().all(|v| !v.contains("87654329"))));
}

#[test]
fn test_session_end_event_reports_store_size() {
    let capture = init_test_capture();
    let mut session = new_session();
    session
        .execute(add_student("Size Check", "A5550003S", "T01"))
        .unwrap();
    let result = session
        .execute(add_student("Size Check Two", "A5550004T", "T01"))
        .unwrap();

    let request_id = result.request_id.to_string();
    let end = capture
        .events_for_op("add_student")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END)
                && e.field(FIELD_REQUEST_ID) == Some(request_id.as_str())
        })
        .expect("end event for second add");
    assert_eq!(end.field(FIELD_STORE_LEN), Some("2"));
}

#[test]
fn test_resolver_logs_candidate_count() {
    let capture = init_test_capture();
    let mut session = new_session();
    session
        .execute(add_student("Twin Resolver", "A5550005R", "T01"))
        .unwrap();
    session
        .execute(add_student("Twin Resolver", "A5550006R", "T01"))
        .unwrap();

    let _ = session.execute(mark("Twin Resolver", None, "2024-01-01", "present"));

    let resolved = capture.count_events(|e| {
        e.field(FIELD_STUDENT_NAME) == Some("Twin Resolver")
            && e.field(FIELD_CANDIDATE_COUNT) == Some("2")
    });
    assert_eq!(resolved, 1);
}

#[test]
fn test_undo_logs_target_command() {
    let capture = init_test_capture();
    let mut session = new_session();
    session
        .execute(add_student("Undo Target", "A5550007U", "T01"))
        .unwrap();

    assert!(session.undo().is_undone());

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("undo")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_COMMAND) == Some("add_student")
    });
    assert!(starts >= 1);
}

#[test]
fn test_undo_after_query_logs_query_command() {
    let capture = init_test_capture();
    let mut session = new_session();
    session
        .execute(add_student("Query Target", "A5550008Q", "T09"))
        .unwrap();
    session
        .execute(Command::GetAttendance {
            name: name("Query Target"),
            student_number: None,
        })
        .unwrap();

    assert!(matches!(session.undo(), UndoOutcome::NotUndoable));

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("undo")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_COMMAND) == Some("get_attendance")
    });
    assert!(starts >= 1);
}
