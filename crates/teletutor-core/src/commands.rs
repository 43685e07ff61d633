//! Command inventory
//!
//! Every mutation and query a session accepts is one variant of `Command`.
//! Arguments arrive already structured; the serde form (tagged by
//! `"command"`, snake_case kind names) is what the CLI reads from JSON lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    Assignment, AssignmentQuery, Name, Phone, StudentEdit, StudentNumber, TutorialGroup,
};

/// One pending mutation or query
///
/// Commands that target an existing student carry a name and an optional
/// student number; the pair is resolved before anything is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Add a new student with no attendance and no assignments
    AddStudent {
        name: Name,
        phone: Phone,
        tutorial_group: TutorialGroup,
        student_number: StudentNumber,
    },

    /// Remove a student together with all of its sub-records
    DeleteStudent {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
    },

    /// Replace a student's fields; attendance and assignments carry over
    EditStudent {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
        edit: StudentEdit,
    },

    /// Record "present"/"absent" for a date (raw token, parsed on execute)
    MarkAttendance {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
        date: NaiveDate,
        status: String,
    },

    AddAssignment {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
        assignment: Assignment,
    },

    /// Remove the first assignment matching `query`
    DeleteAssignment {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
        #[serde(default)]
        query: AssignmentQuery,
    },

    /// Replace the first assignment matching `query` with `replacement`
    EditAssignment {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
        #[serde(default)]
        query: AssignmentQuery,
        replacement: Assignment,
    },

    GetAttendance {
        name: Name,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        student_number: Option<StudentNumber>,
    },

    /// Attendance of every student in a tutorial group; an empty group is valid
    GetAttendanceByGroup { tutorial_group: String },

    /// All students, or only those of one tutorial group
    ListStudents {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tutorial_group: Option<String>,
    },
}

impl Command {
    /// Stable snake_case name of the command kind, used as the log `op`
    pub fn word(&self) -> &'static str {
        match self {
            Command::AddStudent { .. } => "add_student",
            Command::DeleteStudent { .. } => "delete_student",
            Command::EditStudent { .. } => "edit_student",
            Command::MarkAttendance { .. } => "mark_attendance",
            Command::AddAssignment { .. } => "add_assignment",
            Command::DeleteAssignment { .. } => "delete_assignment",
            Command::EditAssignment { .. } => "edit_assignment",
            Command::GetAttendance { .. } => "get_attendance",
            Command::GetAttendanceByGroup { .. } => "get_attendance_by_group",
            Command::ListStudents { .. } => "list_students",
        }
    }

    /// True for queries that never change the store
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::GetAttendance { .. }
                | Command::GetAttendanceByGroup { .. }
                | Command::ListStudents { .. }
        )
    }
}
