use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use teletutor_core_types::Sensitive;

use super::assignment::Assignment;
use super::attendance::AttendanceRecords;
use crate::errors::{Result, TeletutorError};

/// A student's name
///
/// Names are compared exactly (after trimming); two students may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TeletutorError::invalid_input(
                "name",
                "name cannot be empty or whitespace-only",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Student number, the identity key of a student: `A`, seven digits, one letter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentNumber(String);

impl StudentNumber {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let normalized = value.as_ref().trim().to_ascii_uppercase();
        let bytes = normalized.as_bytes();
        let well_formed = bytes.len() == 9
            && bytes[0] == b'A'
            && bytes[1..8].iter().all(u8::is_ascii_digit)
            && bytes[8].is_ascii_alphabetic();
        if !well_formed {
            return Err(TeletutorError::invalid_input(
                "student number",
                format!(
                    "'{}' must be 'A' followed by 7 digits and a letter, e.g. A1234567X",
                    value.as_ref().trim()
                ),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tutorial group tag, e.g. `T01`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TutorialGroup(String);

impl TutorialGroup {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TeletutorError::invalid_input(
                "tutorial group",
                format!("'{}' must be non-empty and alphanumeric", trimmed),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw query string
    pub fn matches(&self, query: &str) -> bool {
        self.0.eq_ignore_ascii_case(query.trim())
    }
}

/// Contact number; redacted in Debug/Display output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(Sensitive<String>);

impl Phone {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.len() < 3 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(TeletutorError::invalid_input(
                "phone",
                "phone numbers should only contain digits and be at least 3 digits long",
            ));
        }
        Ok(Self(Sensitive::new(trimmed.to_string())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose()
    }
}

macro_rules! string_value_conversions {
    ($($ty:ident),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = TeletutorError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl FromStr for $ty {
            type Err = TeletutorError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }
    )*};
}

string_value_conversions!(Name, StudentNumber, TutorialGroup, Phone);

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl From<StudentNumber> for String {
    fn from(value: StudentNumber) -> Self {
        value.0
    }
}

impl From<TutorialGroup> for String {
    fn from(value: TutorialGroup) -> Self {
        value.0
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0.into_inner()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for TutorialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Student - the entity held by the store
///
/// Identity is the student number alone (`is_same_student`); `PartialEq`
/// compares every field, sub-records included. The attendance map and the
/// assignment list belong to this student only and are dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: Name,
    pub phone: Phone,
    pub tutorial_group: TutorialGroup,
    pub student_number: StudentNumber,
    pub attendance: AttendanceRecords,
    /// Assignments in insertion order; duplicates allowed
    pub assignments: Vec<Assignment>,
}

impl Student {
    /// Create a student with no attendance records and no assignments
    pub fn new(
        name: Name,
        phone: Phone,
        tutorial_group: TutorialGroup,
        student_number: StudentNumber,
    ) -> Self {
        Self {
            name,
            phone,
            tutorial_group,
            student_number,
            attendance: AttendanceRecords::default(),
            assignments: Vec::new(),
        }
    }

    /// True if both students have the same student number
    pub fn is_same_student(&self, other: &Student) -> bool {
        self.student_number == other.student_number
    }
}

/// Field replacements for an edit; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_group: Option<TutorialGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_number: Option<StudentNumber>,
}

impl StudentEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.tutorial_group.is_none()
            && self.student_number.is_none()
    }

    /// Build the edited copy of `student`; attendance and assignments carry over
    pub fn apply_to(&self, student: &Student) -> Student {
        let mut edited = student.clone();
        if let Some(name) = &self.name {
            edited.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            edited.phone = phone.clone();
        }
        if let Some(group) = &self.tutorial_group {
            edited.tutorial_group = group.clone();
        }
        if let Some(number) = &self.student_number {
            edited.student_number = number.clone();
        }
        edited
    }
}
