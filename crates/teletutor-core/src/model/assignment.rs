use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, TeletutorError};

/// Name of an assignment; not unique within a student
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssignmentName(String);

impl AssignmentName {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TeletutorError::invalid_input(
                "assignment name",
                "assignment name cannot be empty or whitespace-only",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssignmentName {
    type Error = TeletutorError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<AssignmentName> for String {
    fn from(value: AssignmentName) -> Self {
        value.0
    }
}

impl fmt::Display for AssignmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Y/N flag used for both submission and grading status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    Yes,
    #[default]
    No,
}

impl FromStr for Status {
    type Err = TeletutorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Y" | "y" => Ok(Status::Yes),
            "N" | "n" => Ok(Status::No),
            other => Err(TeletutorError::invalid_input(
                "status",
                format!("'{}' should either be Y or N (case insensitive)", other),
            )),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = TeletutorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Yes => f.write_str("Y"),
            Status::No => f.write_str("N"),
        }
    }
}

/// Grade between 0 and 100 inclusive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Grade(f64);

impl Grade {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(TeletutorError::invalid_input(
                "grade",
                format!("{} must be a number between 0 and 100", value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Grade {
    type Error = TeletutorError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Grade> for f64 {
    fn from(value: Grade) -> Self {
        value.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One assignment record, owned by exactly one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: AssignmentName,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub submission_status: Status,
    #[serde(default)]
    pub grading_status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

impl Assignment {
    /// New assignment: not submitted, not graded, no grade
    pub fn new(name: AssignmentName, deadline: NaiveDate) -> Self {
        Self {
            name,
            deadline,
            submission_status: Status::No,
            grading_status: Status::No,
            grade: None,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (due {}, submitted: {}, graded: {}",
            self.name, self.deadline, self.submission_status, self.grading_status
        )?;
        if let Some(grade) = self.grade {
            write!(f, ", grade: {}", grade)?;
        }
        write!(f, ")")
    }
}

/// Partial-match specification over assignment fields
///
/// An unset field matches anything, so the empty query matches every
/// assignment. Used for lookup and deletion only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<AssignmentName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

impl AssignmentQuery {
    /// Query on assignment name only
    pub fn by_name(name: AssignmentName) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// True if every set field equals the assignment's field
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.name.as_ref().map_or(true, |n| *n == assignment.name)
            && self.deadline.map_or(true, |d| d == assignment.deadline)
            && self
                .submission_status
                .map_or(true, |s| s == assignment.submission_status)
            && self
                .grading_status
                .map_or(true, |s| s == assignment.grading_status)
            && self.grade.map_or(true, |g| Some(g) == assignment.grade)
    }
}

impl fmt::Display for AssignmentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(format!("name={}", name));
        }
        if let Some(deadline) = self.deadline {
            parts.push(format!("deadline={}", deadline));
        }
        if let Some(status) = self.submission_status {
            parts.push(format!("submitted={}", status));
        }
        if let Some(status) = self.grading_status {
            parts.push(format!("graded={}", status));
        }
        if let Some(grade) = self.grade {
            parts.push(format!("grade={}", grade));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}
