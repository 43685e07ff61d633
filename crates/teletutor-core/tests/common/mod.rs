use chrono::NaiveDate;
use teletutor_core::model::{
    Assignment, AssignmentName, AssignmentQuery, Name, Phone, StudentNumber, TutorialGroup,
};
use teletutor_core::{Command, Session, SessionConfig};

/// Fresh session with default configuration
#[allow(dead_code)]
pub fn new_session() -> Session {
    Session::new(SessionConfig::default())
}

#[allow(dead_code)]
pub fn name(s: &str) -> Name {
    Name::new(s).unwrap()
}

#[allow(dead_code)]
pub fn number(s: &str) -> StudentNumber {
    StudentNumber::new(s).unwrap()
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// `add_student` command with a fixed phone number
#[allow(dead_code)]
pub fn add_student(student_name: &str, student_number: &str, group: &str) -> Command {
    Command::AddStudent {
        name: name(student_name),
        phone: Phone::new("91234567").unwrap(),
        tutorial_group: TutorialGroup::new(group).unwrap(),
        student_number: number(student_number),
    }
}

#[allow(dead_code)]
pub fn mark(student_name: &str, student_number: Option<&str>, day: &str, status: &str) -> Command {
    Command::MarkAttendance {
        name: name(student_name),
        student_number: student_number.map(number),
        date: date(day),
        status: status.to_string(),
    }
}

#[allow(dead_code)]
pub fn assignment(assignment_name: &str, deadline: &str) -> Assignment {
    Assignment::new(AssignmentName::new(assignment_name).unwrap(), date(deadline))
}

#[allow(dead_code)]
pub fn add_assignment(student_name: &str, student_number: Option<&str>, a: Assignment) -> Command {
    Command::AddAssignment {
        name: name(student_name),
        student_number: student_number.map(number),
        assignment: a,
    }
}

#[allow(dead_code)]
pub fn delete_assignment_named(
    student_name: &str,
    student_number: Option<&str>,
    assignment_name: &str,
) -> Command {
    Command::DeleteAssignment {
        name: name(student_name),
        student_number: student_number.map(number),
        query: AssignmentQuery::by_name(AssignmentName::new(assignment_name).unwrap()),
    }
}

/// Session pre-loaded with the same-name pair used across scenarios
///
/// Store order: John Ng (A1234567X), Jane Lim (A7654321B), John Ng (A0123456Y)
#[allow(dead_code)]
pub fn session_with_john_ng_twins() -> Session {
    let mut session = new_session();
    for cmd in [
        add_student("John Ng", "A1234567X", "T01"),
        add_student("Jane Lim", "A7654321B", "T01"),
        add_student("John Ng", "A0123456Y", "T02"),
    ] {
        session.execute(cmd).unwrap();
    }
    session
}
