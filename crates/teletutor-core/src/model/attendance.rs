use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::TeletutorError;

/// Attendance status for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl FromStr for AttendanceStatus {
    type Err = TeletutorError;

    /// Accepts "present"/"absent" in any letter case
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("present") {
            Ok(AttendanceStatus::Present)
        } else if trimmed.eq_ignore_ascii_case("absent") {
            Ok(AttendanceStatus::Absent)
        } else {
            Err(TeletutorError::InvalidAttendanceStatus {
                token: token.to_string(),
            })
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => f.write_str("present"),
            AttendanceStatus::Absent => f.write_str("absent"),
        }
    }
}

/// Date -> status map, at most one record per date
///
/// Backed by a `BTreeMap` so iteration is in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceRecords(BTreeMap<NaiveDate, AttendanceStatus>);

impl AttendanceRecords {
    /// Record `status` for `date`, returning the status it replaced
    pub fn set(&mut self, date: NaiveDate, status: AttendanceStatus) -> Option<AttendanceStatus> {
        self.0.insert(date, status)
    }

    pub fn get(&self, date: NaiveDate) -> Option<AttendanceStatus> {
        self.0.get(&date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, AttendanceStatus)> + '_ {
        self.0.iter().map(|(date, status)| (*date, *status))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
