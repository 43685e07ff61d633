//! Command execution and undo
//!
//! `execute()` is the single entry point that turns a `Command` into a
//! mutation (or query) of the store. It returns the user-facing message and an
//! `ExecutedCommand` holding the exact inverse needed to undo it once.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: every precondition is checked, and every changed
//!   student is built as a copy, before the store is touched. An `Err` means
//!   the store is exactly as it was.
//! - **No panics**: invalid input returns typed errors.
//!
//! ## Example
//!
//! ```
//! use teletutor_core::{apply::execute, Command, SessionConfig, Store};
//!
//! let mut store = Store::new();
//! let cmd: Command = serde_json::from_str(
//!     r#"{"command":"add_student","name":"John Ng","phone":"91234567",
//!         "tutorial_group":"T01","student_number":"A1234567X"}"#,
//! ).unwrap();
//!
//! let (message, executed) = execute(&mut store, cmd, &SessionConfig::default()).unwrap();
//! assert_eq!(message, "New student added: John Ng (A1234567X)");
//!
//! executed.undo(&mut store).unwrap();
//! assert!(store.is_empty());
//! ```

use crate::commands::Command;
use crate::errors::{Result, TeletutorError};
use crate::model::{Student, StudentNumber};
use crate::ops::{assignment_ops, attendance_ops, Store};
use crate::resolver;
use crate::session::SessionConfig;

/// The mutation that reverses an executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Inverse {
    /// Undo an add: remove the student that was added
    RemoveStudent { student_number: StudentNumber },
    /// Undo a delete: put the student back where it was
    RestoreStudent { position: usize, student: Student },
    /// Undo a whole-record replace: swap `current` back to `previous`
    ReplaceStudent { current: Student, previous: Student },
}

/// A command that has run, together with what is needed to undo it
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedCommand {
    command: Command,
    message: String,
    inverse: Option<Inverse>,
}

impl ExecutedCommand {
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// The message the command produced when it ran
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Reverse exactly the mutation this command made
    ///
    /// Returns `Ok(false)` for read-only commands, leaving the store alone.
    ///
    /// # Errors
    ///
    /// Returns `UndoTargetChanged` if the store no longer holds what the
    /// command left behind; the store is not modified in that case.
    pub fn undo(self, store: &mut Store) -> Result<bool> {
        let Some(inverse) = self.inverse else {
            return Ok(false);
        };

        match inverse {
            Inverse::RemoveStudent { student_number } => {
                let added = store
                    .get(&student_number)
                    .cloned()
                    .ok_or_else(|| target_changed(&student_number))?;
                store
                    .remove(&added)
                    .map_err(|_| target_changed(&student_number))?;
            }

            Inverse::RestoreStudent { position, student } => {
                let number = student.student_number.clone();
                store
                    .insert_at(position, student)
                    .map_err(|_| target_changed(&number))?;
            }

            Inverse::ReplaceStudent { current, previous } => {
                store
                    .replace(&current, previous)
                    .map_err(|_| target_changed(&current.student_number))?;
            }
        }

        Ok(true)
    }
}

fn target_changed(number: &StudentNumber) -> TeletutorError {
    TeletutorError::UndoTargetChanged {
        student_number: number.to_string(),
    }
}

/// Execute a command against the store
///
/// # Returns
///
/// * `Ok((message, executed))` - the user-facing result and the undo record
/// * `Err(TeletutorError)` - typed error, store unchanged
///
/// # Errors
///
/// Resolution errors (`StudentNotFound`, `AmbiguousStudent`), identity
/// collisions (`DuplicateStudent`), bad attendance tokens
/// (`InvalidAttendanceStatus`), unmatched assignment queries
/// (`AssignmentNotFound`) and empty edits (`InvalidInput`).
pub fn execute(
    store: &mut Store,
    cmd: Command,
    config: &SessionConfig,
) -> Result<(String, ExecutedCommand)> {
    let (message, inverse) = match &cmd {
        Command::AddStudent {
            name,
            phone,
            tutorial_group,
            student_number,
        } => {
            let student = Student::new(
                name.clone(),
                phone.clone(),
                tutorial_group.clone(),
                student_number.clone(),
            );
            store.add(student)?;
            (
                format!("New student added: {} ({})", name, student_number),
                Some(Inverse::RemoveStudent {
                    student_number: student_number.clone(),
                }),
            )
        }

        Command::DeleteStudent {
            name,
            student_number,
        } => {
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let (position, removed) = store.remove(&target)?;
            (
                format!(
                    "Deleted student: {} ({})",
                    removed.name, removed.student_number
                ),
                Some(Inverse::RestoreStudent {
                    position,
                    student: removed,
                }),
            )
        }

        Command::EditStudent {
            name,
            student_number,
            edit,
        } => {
            if edit.is_empty() {
                return Err(TeletutorError::invalid_input(
                    "edit",
                    "at least one field to edit must be provided",
                ));
            }
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let edited = edit.apply_to(&target);
            let message = format!(
                "Edited student: {} ({})",
                edited.name, edited.student_number
            );
            (message, Some(replace_student(store, target, edited)?))
        }

        Command::MarkAttendance {
            name,
            student_number,
            date,
            status,
        } => {
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let mut updated = target.clone();
            let marked = attendance_ops::mark_attendance(&mut updated, *date, status)?;
            let message = format!(
                "Marked {}'s attendance as {} on {}",
                updated.name, marked, date
            );
            (message, Some(replace_student(store, target, updated)?))
        }

        Command::AddAssignment {
            name,
            student_number,
            assignment,
        } => {
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let mut updated = target.clone();
            assignment_ops::add_assignment(&mut updated, assignment.clone());
            let message = format!("Added assignment {} to {}", assignment.name, updated.name);
            (message, Some(replace_student(store, target, updated)?))
        }

        Command::DeleteAssignment {
            name,
            student_number,
            query,
        } => {
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let mut updated = target.clone();
            let removed = assignment_ops::delete_first_matching(&mut updated, query).ok_or_else(
                || TeletutorError::AssignmentNotFound {
                    student_name: target.name.to_string(),
                    query: query.to_string(),
                },
            )?;
            let message = format!("Deleted assignment {} from {}", removed.name, updated.name);
            (message, Some(replace_student(store, target, updated)?))
        }

        Command::EditAssignment {
            name,
            student_number,
            query,
            replacement,
        } => {
            let target = resolver::resolve(store, name, student_number.as_ref())?.clone();
            let mut updated = target.clone();
            let previous =
                assignment_ops::replace_first_matching(&mut updated, query, replacement.clone())
                    .ok_or_else(|| TeletutorError::AssignmentNotFound {
                        student_name: target.name.to_string(),
                        query: query.to_string(),
                    })?;
            let message = format!(
                "Edited assignment {} of {}: {}",
                previous.name, updated.name, replacement
            );
            (message, Some(replace_student(store, target, updated)?))
        }

        Command::GetAttendance {
            name,
            student_number,
        } => {
            let student = resolver::resolve(store, name, student_number.as_ref())?;
            (
                format!(
                    "Attendance for {} ({}):\n{}",
                    student.name,
                    student.student_number,
                    attendance_ops::attendance_as_text(student)
                ),
                None,
            )
        }

        Command::GetAttendanceByGroup { tutorial_group } => {
            (group_attendance(store, tutorial_group, config), None)
        }

        Command::ListStudents { tutorial_group } => {
            (list_students(store, tutorial_group.as_deref()), None)
        }
    };

    debug_assert_eq!(inverse.is_none(), cmd.is_read_only());

    Ok((
        message.clone(),
        ExecutedCommand {
            command: cmd,
            message,
            inverse,
        },
    ))
}

/// Swap `target` for `updated` and return the inverse that swaps it back
fn replace_student(store: &mut Store, target: Student, updated: Student) -> Result<Inverse> {
    let previous = store.replace(&target, updated.clone())?;
    Ok(Inverse::ReplaceStudent {
        current: updated,
        previous,
    })
}

fn group_attendance(store: &Store, group: &str, config: &SessionConfig) -> String {
    let group = group.trim();
    let students = attendance_ops::by_group(store, group);

    if students.is_empty() {
        return format!("No students found in tutorial group {}.", group);
    }

    let records = students
        .iter()
        .map(|s| {
            let lines = attendance_ops::attendance_as_text(s)
                .lines()
                .map(|line| format!("  {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{} ({}):\n{}", s.name, s.student_number, lines)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut message = format!(
        "Attendance for students in tutorial group {}:\n{}",
        group, records
    );

    if config.warn_on_name_collisions {
        let shared = resolver::name_collisions(&students);
        if !shared.is_empty() {
            let names = shared
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(
                "\nNote: more than one student is named {}. Use student numbers to tell them apart.",
                names
            ));
        }
    }

    message
}

fn list_students(store: &Store, group: Option<&str>) -> String {
    let students: Vec<&Student> = match group {
        Some(group) => attendance_ops::by_group(store, group),
        None => store.all().collect(),
    };

    if students.is_empty() {
        return match group {
            Some(group) => format!("No students found in tutorial group {}.", group.trim()),
            None => "No students found.".to_string(),
        };
    }

    let lines = students
        .iter()
        .map(|s| {
            format!(
                "{} ({}), tutorial group {}, {} assignment(s)",
                s.name,
                s.student_number,
                s.tutorial_group,
                s.assignments.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Listed {} student(s):\n{}", students.len(), lines)
}
