use chrono::NaiveDate;

use super::store::Store;
use crate::errors::Result;
use crate::model::{AttendanceStatus, Student};

/// Shown instead of an empty rendering
pub const NO_ATTENDANCE_RECORDS: &str = "No attendance records.";

/// Mark a student's attendance for a date
///
/// Parses `token` first, so an invalid status leaves the student untouched.
/// Marking the same date again overwrites the earlier status.
///
/// # Returns
/// The status now recorded for `date`
///
/// # Errors
/// * `InvalidAttendanceStatus` - If `token` is neither "present" nor "absent"
pub fn mark_attendance(
    student: &mut Student,
    date: NaiveDate,
    token: &str,
) -> Result<AttendanceStatus> {
    let status: AttendanceStatus = token.parse()?;
    student.attendance.set(date, status);
    Ok(status)
}

/// Render a student's attendance, one `YYYY-MM-DD: status` line per date
pub fn attendance_as_text(student: &Student) -> String {
    if student.attendance.is_empty() {
        return NO_ATTENDANCE_RECORDS.to_string();
    }

    student
        .attendance
        .iter()
        .map(|(date, status)| format!("{}: {}", date, status))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Students in `group` (case-insensitive), in store order
///
/// A group with no students yields an empty vector rather than an error.
pub fn by_group<'a>(store: &'a Store, group: &str) -> Vec<&'a Student> {
    let group = group.to_string();
    store
        .filtered(move |s| s.tutorial_group.matches(&group))
        .collect()
}
