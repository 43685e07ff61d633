//! Teletutor Core - command execution and student resolution engine
//!
//! This crate holds everything a tutor's record manager needs in memory:
//! - Student, attendance and assignment models with validated value objects
//! - An insertion-ordered student store
//! - A resolver that turns (name, optional student number) into one student
//!   or reports every candidate when the name is shared
//! - A closed command inventory with execute/undo semantics
//! - A `Session` owning the store and a single-slot undo register

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod resolver;
pub mod session;

// Re-export commonly used types
pub use apply::{execute, ExecutedCommand, Inverse};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, Result, TeletutorError};
pub use model::{Assignment, AssignmentQuery, AttendanceStatus, Student, StudentEdit};
pub use ops::Store;
pub use session::{CommandResult, CommandStack, Session, SessionConfig, UndoOutcome};
