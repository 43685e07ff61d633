use crate::model::{Assignment, AssignmentQuery, Student};

/// Append an assignment to the student's list; duplicates are allowed
pub fn add_assignment(student: &mut Student, assignment: Assignment) {
    student.assignments.push(assignment);
}

/// Remove the first assignment (insertion order) matching `query`
///
/// Returns `None` when nothing matches, leaving the list untouched.
pub fn delete_first_matching(student: &mut Student, query: &AssignmentQuery) -> Option<Assignment> {
    let position = student
        .assignments
        .iter()
        .position(|a| query.matches(a))?;
    Some(student.assignments.remove(position))
}

/// Replace the first assignment matching `query` with `replacement`
///
/// Returns the replaced record, or `None` when nothing matches.
pub fn replace_first_matching(
    student: &mut Student,
    query: &AssignmentQuery,
    replacement: Assignment,
) -> Option<Assignment> {
    let slot = student.assignments.iter_mut().find(|a| query.matches(a))?;
    Some(std::mem::replace(slot, replacement))
}
