pub mod assignment;
pub mod attendance;
pub mod student;

pub use assignment::{Assignment, AssignmentName, AssignmentQuery, Grade, Status};
pub use attendance::{AttendanceRecords, AttendanceStatus};
pub use student::{Name, Phone, Student, StudentEdit, StudentNumber, TutorialGroup};
