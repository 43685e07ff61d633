//! One JSON line in, one printed result out

use serde_json::Value;
use teletutor_core::{Command, ExError, Session, TeletutorError, UndoOutcome};

/// A decoded input line
#[derive(Debug, PartialEq)]
pub enum Request {
    Execute(Box<Command>),
    Undo,
}

/// Decode one input line
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Request>, ExError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(line).map_err(malformed)?;
    if value.get("command").and_then(Value::as_str) == Some("undo") {
        return Ok(Some(Request::Undo));
    }

    let command: Command = serde_json::from_value(value).map_err(malformed)?;
    Ok(Some(Request::Execute(Box::new(command))))
}

fn malformed(err: serde_json::Error) -> ExError {
    ExError::from(TeletutorError::from(err)).with_op("parse_request")
}

/// What handling a line printed, and whether it counts as a failure
#[derive(Debug, PartialEq)]
pub struct LineOutput {
    pub text: String,
    pub failed: bool,
}

impl LineOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    fn error(err: &ExError) -> Self {
        Self {
            text: format!("Error [{}]: {}", err.code(), err.message()),
            failed: true,
        }
    }
}

/// Parse and run one line against the session
///
/// Returns `None` for lines that carry no request.
pub fn handle_line(session: &mut Session, line: &str) -> Option<LineOutput> {
    let request = match parse_line(line) {
        Ok(request) => request?,
        Err(err) => return Some(LineOutput::error(&err)),
    };

    Some(match request {
        Request::Execute(command) => match session.execute(*command) {
            Ok(result) => LineOutput::ok(result.message),
            Err(err) => LineOutput::error(&err),
        },
        Request::Undo => match session.undo() {
            UndoOutcome::Failed(err) => LineOutput::error(&err),
            outcome => LineOutput::ok(outcome.message()),
        },
    })
}

/// Like `handle_line`, for raw bytes that may not be UTF-8
///
/// Undecodable input is reported as an error line; the session is not touched.
pub fn handle_raw_line(session: &mut Session, raw: &[u8]) -> Option<LineOutput> {
    match std::str::from_utf8(raw) {
        Ok(line) => handle_line(session, line),
        Err(err) => {
            let err = ExError::from(TeletutorError::MalformedRequest {
                message: format!("line is not valid UTF-8 ({})", err),
            })
            .with_op("parse_request");
            Some(LineOutput::error(&err))
        }
    }
}
