//! Student reference resolution.
//!
//! Commands name their target student by name, optionally qualified by a
//! student number. Names are not unique, so a bare name only resolves when
//! exactly one student carries it; otherwise the caller gets the full list of
//! candidate numbers and must re-issue the command with one of them.

use crate::errors::{Result, TeletutorError};
use crate::model::{Name, Student, StudentNumber};
use crate::ops::Store;

/// Resolve a (name, optional student number) reference to one student
///
/// # Errors
///
/// - `StudentNotFound` if no student has the name, or none of the same-name
///   students has the given number.
/// - `AmbiguousStudent` if several students share the name and no number was
///   given; candidates are listed in store insertion order.
pub fn resolve<'a>(
    store: &'a Store,
    name: &Name,
    student_number: Option<&StudentNumber>,
) -> Result<&'a Student> {
    let matches = store.by_exact_name(name);

    tracing::debug!(
        student_name = %name,
        candidate_count = matches.len(),
        "resolving student reference"
    );

    let not_found = || TeletutorError::StudentNotFound {
        name: name.to_string(),
        student_number: student_number.map(|n| n.to_string()),
    };

    match student_number {
        Some(number) => matches
            .into_iter()
            .find(|s| s.student_number == *number)
            .ok_or_else(not_found),
        None => match matches.as_slice() {
            [] => Err(not_found()),
            [only] => Ok(*only),
            many => Err(TeletutorError::AmbiguousStudent {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|s| s.student_number.to_string())
                    .collect(),
            }),
        },
    }
}

/// Names carried by more than one of `students`, in first-seen order
pub fn name_collisions(students: &[&Student]) -> Vec<Name> {
    let mut counts: Vec<(&Name, usize)> = Vec::new();

    for student in students {
        match counts.iter_mut().find(|(name, _)| **name == student.name) {
            Some((_, count)) => *count += 1,
            None => counts.push((&student.name, 1)),
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.clone())
        .collect()
}
