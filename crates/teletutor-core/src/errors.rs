use teletutor_core_types::RequestId;
use thiserror::Error;

/// Result type alias using TeletutorError
pub type Result<T> = std::result::Result<T, TeletutorError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on instead of
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    NotFound,
    AmbiguousReference,

    // Mutation
    DuplicateIdentity,
    InvalidStatus,

    // Undo
    /// Signalled through `UndoOutcome`, never returned as a failure
    NotUndoable,

    // Structural/Validation
    InvalidInput,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AmbiguousReference => "ERR_AMBIGUOUS_REFERENCE",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::InvalidStatus => "ERR_INVALID_STATUS",
            ExErrorKind::NotUndoable => "ERR_NOT_UNDOABLE",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This is what a caller of the session sees: a kind, a human-readable
/// message, and whatever context is needed to retry (candidate student
/// numbers for an ambiguous reference).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (a student number)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add candidate student numbers (populated on AmbiguousReference)
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Candidate student numbers, in store insertion order
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (student_number: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

fn number_suffix(student_number: &Option<String>) -> String {
    student_number
        .as_ref()
        .map(|n| format!(" ({})", n))
        .unwrap_or_default()
}

fn join_candidates(candidates: &[String]) -> String {
    candidates.join(", ")
}

/// Domain error taxonomy for teletutor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TeletutorError {
    /// No student matches the given name (and student number, if supplied)
    #[error("This student is not in your student list: {name}{}", number_suffix(.student_number))]
    StudentNotFound {
        name: String,
        student_number: Option<String>,
    },

    /// More than one student shares the name and no student number was given
    #[error(
        "There is more than 1 student named {name}. Their student numbers are: {}. \
         Re-issue the command with a student number.",
        join_candidates(.candidates)
    )]
    AmbiguousStudent {
        name: String,
        candidates: Vec<String>,
    },

    /// A student with this student number already exists
    #[error("This student already exists: {student_number}")]
    DuplicateStudent { student_number: String },

    /// Attendance token was neither "present" nor "absent"
    #[error("Invalid attendance status '{token}': status must be either 'present' or 'absent'")]
    InvalidAttendanceStatus { token: String },

    /// No assignment of the student matches the query
    #[error("No assignment matching {query} found for {student_name}")]
    AssignmentNotFound { student_name: String, query: String },

    /// A value object rejected its input
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A request could not be decoded
    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    /// The store no longer holds what an executed command left behind
    #[error("Cannot undo: student {student_number} changed since the command ran")]
    UndoTargetChanged { student_number: String },
}

impl TeletutorError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        TeletutorError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Conversion from TeletutorError to ExError
impl From<TeletutorError> for ExError {
    fn from(err: TeletutorError) -> Self {
        let message = err.to_string();
        match err {
            TeletutorError::StudentNotFound { student_number, .. } => {
                let ex = ExError::new(ExErrorKind::NotFound).with_message(message);
                match student_number {
                    Some(n) => ex.with_entity_id(n),
                    None => ex,
                }
            }

            TeletutorError::AmbiguousStudent { candidates, .. } => {
                ExError::new(ExErrorKind::AmbiguousReference)
                    .with_message(message)
                    .with_candidates(candidates)
            }

            TeletutorError::DuplicateStudent { student_number } => {
                ExError::new(ExErrorKind::DuplicateIdentity)
                    .with_entity_id(student_number)
                    .with_message(message)
            }

            TeletutorError::InvalidAttendanceStatus { .. } => {
                ExError::new(ExErrorKind::InvalidStatus).with_message(message)
            }

            TeletutorError::AssignmentNotFound { .. } => {
                ExError::new(ExErrorKind::NotFound).with_message(message)
            }

            TeletutorError::InvalidInput { .. } | TeletutorError::MalformedRequest { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            TeletutorError::UndoTargetChanged { student_number } => {
                ExError::new(ExErrorKind::Internal)
                    .with_entity_id(student_number)
                    .with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to TeletutorError
impl From<serde_json::Error> for TeletutorError {
    fn from(err: serde_json::Error) -> Self {
        TeletutorError::MalformedRequest {
            message: err.to_string(),
        }
    }
}
