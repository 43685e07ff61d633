use crate::errors::{Result, TeletutorError};
use crate::model::{Name, Student, StudentNumber};

/// In-memory store for students
///
/// A `Vec` keeps insertion order, which the resolver reports candidates in.
/// Not thread-safe (no Arc/RwLock) - designed for single-threaded use behind a
/// `Session`. Every mutating method checks its preconditions before touching
/// the collection, so a returned error means nothing changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    students: Vec<Student>,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    /// Add a student at the end of the store
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStudent` if a student with the same number exists.
    pub fn add(&mut self, student: Student) -> Result<()> {
        self.ensure_number_free(&student.student_number)?;
        self.students.push(student);
        Ok(())
    }

    /// Insert a student at `position` (clamped to the end of the store)
    ///
    /// Used to put a deleted student back where it was.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStudent` if a student with the same number exists.
    pub fn insert_at(&mut self, position: usize, student: Student) -> Result<()> {
        self.ensure_number_free(&student.student_number)?;
        let position = position.min(self.students.len());
        self.students.insert(position, student);
        Ok(())
    }

    /// Remove the student with the same identity as `student`
    ///
    /// Returns the former position together with the removed student.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` if no student has that number.
    pub fn remove(&mut self, student: &Student) -> Result<(usize, Student)> {
        let position = self
            .position(&student.student_number)
            .ok_or_else(|| TeletutorError::StudentNotFound {
                name: student.name.to_string(),
                student_number: Some(student.student_number.to_string()),
            })?;
        Ok((position, self.students.remove(position)))
    }

    /// Replace `old` (located by full equality) with `new`, returning `old`
    ///
    /// # Errors
    ///
    /// * `StudentNotFound` - no stored student equals `old`
    /// * `DuplicateStudent` - `new` takes the number of a different stored student
    pub fn replace(&mut self, old: &Student, new: Student) -> Result<Student> {
        let position = self
            .students
            .iter()
            .position(|s| s == old)
            .ok_or_else(|| TeletutorError::StudentNotFound {
                name: old.name.to_string(),
                student_number: Some(old.student_number.to_string()),
            })?;

        if !old.is_same_student(&new) {
            self.ensure_number_free(&new.student_number)?;
        }

        Ok(std::mem::replace(&mut self.students[position], new))
    }

    /// All students in insertion order
    ///
    /// The iterator borrows the live store and can be cloned to restart it.
    pub fn all(&self) -> impl Iterator<Item = &Student> + Clone + '_ {
        self.students.iter()
    }

    /// Students satisfying `predicate`, in insertion order
    pub fn filtered<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Student> + Clone + 'a
    where
        P: Fn(&Student) -> bool + Clone + 'a,
    {
        self.students.iter().filter(move |s| predicate(s))
    }

    /// Every student whose name equals `name`, in insertion order
    pub fn by_exact_name(&self, name: &Name) -> Vec<&Student> {
        self.students.iter().filter(|s| s.name == *name).collect()
    }

    /// Look up a student by number
    pub fn get(&self, number: &StudentNumber) -> Option<&Student> {
        self.students.iter().find(|s| s.student_number == *number)
    }

    /// True if a student with this number exists (identity check)
    pub fn contains(&self, number: &StudentNumber) -> bool {
        self.position(number).is_some()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn position(&self, number: &StudentNumber) -> Option<usize> {
        self.students
            .iter()
            .position(|s| s.student_number == *number)
    }

    fn ensure_number_free(&self, number: &StudentNumber) -> Result<()> {
        if self.contains(number) {
            return Err(TeletutorError::DuplicateStudent {
                student_number: number.to_string(),
            });
        }
        Ok(())
    }
}
