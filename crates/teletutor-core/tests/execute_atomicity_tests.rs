#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Execute Atomicity Tests
//!
//! A failed command must leave the store exactly as it found it.
//!
//! ## Scenarios Covered
//!
//! 1. Duplicate student number on add
//! 2. Edit that would steal another student's number
//! 3. Bad attendance token after a successful resolution
//! 4. Unmatched assignment query after a successful resolution

mod common;

use common::*;
use teletutor_core::model::StudentEdit;
use teletutor_core::{apply, Command, ExErrorKind, SessionConfig, Store, TeletutorError};

fn seeded_store() -> Store {
    let mut session = session_with_john_ng_twins();
    session
        .execute(mark("Jane Lim", None, "2024-01-08", "present"))
        .unwrap();
    session.store().clone()
}

fn assert_fails_atomically(cmd: Command) -> TeletutorError {
    // GIVEN a seeded store
    let mut store = seeded_store();
    let original = store.clone();

    // WHEN the command fails
    let err = apply::execute(&mut store, cmd, &SessionConfig::default()).unwrap_err();

    // THEN nothing changed
    assert_eq!(store, original);
    err
}

#[test]
fn test_duplicate_add_is_atomic() {
    let err = assert_fails_atomically(add_student("Someone Else", "A7654321B", "T09"));
    assert_eq!(
        err,
        TeletutorError::DuplicateStudent {
            student_number: "A7654321B".to_string()
        }
    );
}

#[test]
fn test_edit_number_collision_is_atomic() {
    let err = assert_fails_atomically(Command::EditStudent {
        name: name("Jane Lim"),
        student_number: None,
        edit: StudentEdit {
            student_number: Some(number("A1234567X")),
            ..StudentEdit::default()
        },
    });
    assert!(matches!(err, TeletutorError::DuplicateStudent { .. }));
}

#[test]
fn test_bad_status_is_atomic() {
    let err = assert_fails_atomically(mark("Jane Lim", None, "2024-01-08", "tardy"));
    assert!(matches!(err, TeletutorError::InvalidAttendanceStatus { .. }));
}

#[test]
fn test_unmatched_assignment_edit_is_atomic() {
    let err = assert_fails_atomically(Command::EditAssignment {
        name: name("Jane Lim"),
        student_number: None,
        query: Default::default(),
        replacement: assignment("Lab 1", "2024-02-01"),
    });
    assert!(matches!(err, TeletutorError::AssignmentNotFound { .. }));
}

#[test]
fn test_failures_surface_typed_errors() {
    let mut session = session_with_john_ng_twins();

    let cases = [
        (add_student("X", "A1234567X", "T01"), ExErrorKind::DuplicateIdentity),
        (
            mark("Nobody", None, "2024-01-01", "present"),
            ExErrorKind::NotFound,
        ),
        (
            mark("John Ng", None, "2024-01-01", "present"),
            ExErrorKind::AmbiguousReference,
        ),
        (
            mark("Jane Lim", None, "2024-01-01", "maybe"),
            ExErrorKind::InvalidStatus,
        ),
        (
            Command::EditStudent {
                name: name("Jane Lim"),
                student_number: None,
                edit: StudentEdit::default(),
            },
            ExErrorKind::InvalidInput,
        ),
    ];

    for (cmd, expected) in cases {
        let word = cmd.word();
        let err = session.execute(cmd).unwrap_err();
        assert_eq!(err.kind(), expected, "wrong kind for {}", word);
        assert_eq!(err.op(), Some(word));
    }
}
