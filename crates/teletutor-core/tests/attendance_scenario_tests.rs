#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Attendance marking and reporting

mod common;

use common::*;
use teletutor_core::model::AttendanceStatus;
use teletutor_core::{Command, ExErrorKind, Session, SessionConfig};

#[test]
fn test_remark_same_date_overwrites() {
    let mut session = new_session();
    session
        .execute(add_student("John Ng", "A1234567X", "T01"))
        .unwrap();

    session
        .execute(mark("John Ng", None, "2024-01-01", "present"))
        .unwrap();
    session
        .execute(mark("John Ng", None, "2024-01-01", "Absent"))
        .unwrap();

    let john = session.store().get(&number("A1234567X")).unwrap();
    assert_eq!(john.attendance.len(), 1);
    assert_eq!(
        john.attendance.get(date("2024-01-01")),
        Some(AttendanceStatus::Absent)
    );
}

#[test]
fn test_invalid_status_reports_invalid_status() {
    let mut session = new_session();
    session
        .execute(add_student("John Ng", "A1234567X", "T01"))
        .unwrap();

    let err = session
        .execute(mark("John Ng", None, "2024-01-01", "excused"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidStatus);
}

#[test]
fn test_get_attendance_lists_dates_in_order() {
    let mut session = new_session();
    session
        .execute(add_student("John Ng", "A1234567X", "T01"))
        .unwrap();
    session
        .execute(mark("John Ng", None, "2024-01-15", "absent"))
        .unwrap();
    session
        .execute(mark("John Ng", None, "2024-01-08", "present"))
        .unwrap();

    let result = session
        .execute(Command::GetAttendance {
            name: name("John Ng"),
            student_number: None,
        })
        .unwrap();

    assert_eq!(
        result.message,
        "Attendance for John Ng (A1234567X):\n2024-01-08: present\n2024-01-15: absent"
    );
}

#[test]
fn test_group_attendance_report() {
    // GIVEN two John Ngs, only one in T01 alongside Jane Lim
    let mut session = session_with_john_ng_twins();
    session
        .execute(mark("Jane Lim", None, "2024-01-08", "present"))
        .unwrap();

    // WHEN reporting T01 (lower-case query)
    let result = session
        .execute(Command::GetAttendanceByGroup {
            tutorial_group: "t01".to_string(),
        })
        .unwrap();

    // THEN both T01 students appear in store order, with no collision note
    assert_eq!(
        result.message,
        "Attendance for students in tutorial group t01:\n\
         John Ng (A1234567X):\n  No attendance records.\n\
         Jane Lim (A7654321B):\n  2024-01-08: present"
    );
}

#[test]
fn test_group_attendance_notes_shared_names() {
    let mut session = new_session();
    session
        .execute(add_student("John Ng", "A1234567X", "T05"))
        .unwrap();
    session
        .execute(add_student("John Ng", "A0123456Y", "T05"))
        .unwrap();

    let result = session
        .execute(Command::GetAttendanceByGroup {
            tutorial_group: "T05".to_string(),
        })
        .unwrap();

    assert!(result.message.ends_with(
        "Note: more than one student is named John Ng. Use student numbers to tell them apart."
    ));
}

#[test]
fn test_group_attendance_note_can_be_disabled() {
    let mut session = Session::new(SessionConfig {
        warn_on_name_collisions: false,
    });
    session
        .execute(add_student("John Ng", "A1234567X", "T05"))
        .unwrap();
    session
        .execute(add_student("John Ng", "A0123456Y", "T05"))
        .unwrap();

    let result = session
        .execute(Command::GetAttendanceByGroup {
            tutorial_group: "T05".to_string(),
        })
        .unwrap();

    assert!(!result.message.contains("Note:"));
}

#[test]
fn test_empty_group_is_a_valid_query() {
    let mut session = session_with_john_ng_twins();

    let result = session
        .execute(Command::GetAttendanceByGroup {
            tutorial_group: String::new(),
        })
        .unwrap();

    assert_eq!(result.message, "No students found in tutorial group .");
}

#[test]
fn test_remark_same_status_keeps_single_record() {
    // GIVEN John Ng marked present on 2024-01-01
    let mut session = new_session();
    session
        .execute(add_student("John Ng", "A1234567X", "T01"))
        .unwrap();
    session
        .execute(mark("John Ng", None, "2024-01-01", "present"))
        .unwrap();

    // WHEN the same mark is issued again
    session
        .execute(mark("John Ng", None, "2024-01-01", "present"))
        .unwrap();

    // THEN there is still one present record for that date
    let john = session.store().get(&number("A1234567X")).unwrap();
    assert_eq!(john.attendance.len(), 1);
    assert_eq!(
        john.attendance.get(date("2024-01-01")),
        Some(AttendanceStatus::Present)
    );

    // AND undoing the second mark leaves the first in place
    assert!(session.undo().is_undone());
    let john = session.store().get(&number("A1234567X")).unwrap();
    assert_eq!(john.attendance.len(), 1);
    assert_eq!(
        john.attendance.get(date("2024-01-01")),
        Some(AttendanceStatus::Present)
    );
}
