//! Session: the store plus the single-slot undo register
//!
//! A `Session` is the only thing callers need to hold. It runs commands one at
//! a time against its store, remembers the most recent successful command, and
//! can undo that command once. There is no global state; two sessions are
//! fully independent.

use std::time::Instant;

use teletutor_core_types::{RequestContext, RequestId};

use crate::apply::{self, ExecutedCommand};
use crate::commands::Command;
use crate::errors::ExError;
use crate::ops::Store;
use crate::{log_op_end, log_op_error, log_op_start};

pub const MESSAGE_NOTHING_TO_UNDO: &str = "There are no commands to undo";
pub const MESSAGE_NOT_UNDOABLE: &str = "The previous command is not undoable";

/// Session behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Append a note to group attendance output when names are shared
    pub warn_on_name_collisions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warn_on_name_collisions: true,
        }
    }
}

/// Holds at most one executed command
///
/// Pushing overwrites whatever was there: only the most recent command can be
/// undone.
#[derive(Debug, Default)]
pub struct CommandStack {
    slot: Option<ExecutedCommand>,
}

impl CommandStack {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Store `executed`, returning the command it displaced
    pub fn push(&mut self, executed: ExecutedCommand) -> Option<ExecutedCommand> {
        self.slot.replace(executed)
    }

    pub fn peek(&self) -> Option<&ExecutedCommand> {
        self.slot.as_ref()
    }

    pub fn take(&mut self) -> Option<ExecutedCommand> {
        self.slot.take()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// Successful result of `Session::execute`
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub message: String,
    pub request_id: RequestId,
}

/// What `Session::undo` did
#[derive(Debug, Clone)]
pub enum UndoOutcome {
    /// The previous command was reversed
    Undone(String),
    /// The slot was empty
    NothingToUndo,
    /// The previous command was a read-only query; it stays in the slot
    NotUndoable,
    /// The inverse could not be applied; the command is discarded
    Failed(ExError),
}

impl UndoOutcome {
    pub fn message(&self) -> &str {
        match self {
            UndoOutcome::Undone(message) => message,
            UndoOutcome::NothingToUndo => MESSAGE_NOTHING_TO_UNDO,
            UndoOutcome::NotUndoable => MESSAGE_NOT_UNDOABLE,
            UndoOutcome::Failed(err) => err.message(),
        }
    }

    pub fn is_undone(&self) -> bool {
        matches!(self, UndoOutcome::Undone(_))
    }
}

/// The store and undo slot for one user
#[derive(Debug, Default)]
pub struct Session {
    store: Store,
    stack: CommandStack,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_store(Store::new(), config)
    }

    /// Start a session over existing records
    pub fn with_store(store: Store, config: SessionConfig) -> Self {
        Self {
            store,
            stack: CommandStack::new(),
            config,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stack(&self) -> &CommandStack {
        &self.stack
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Execute a command and remember it for undo
    ///
    /// Read-only queries are remembered too, so an undo right after one
    /// reports that the previous command is not undoable.
    ///
    /// # Errors
    ///
    /// Returns the command's failure as an `ExError` carrying the op name and
    /// request id. The store and the undo slot are left exactly as they were.
    pub fn execute(&mut self, cmd: Command) -> Result<CommandResult, ExError> {
        let op = cmd.word();
        let ctx = RequestContext::new(op);
        log_op_start!(op, request_id = %ctx.request_id, command = %ctx.command);
        let start = Instant::now();

        match apply::execute(&mut self.store, cmd, &self.config) {
            Ok((message, executed)) => {
                self.stack.push(executed);
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = %ctx.request_id,
                    store_len = self.store.len()
                );
                Ok(CommandResult {
                    message,
                    request_id: ctx.request_id,
                })
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = %ctx.request_id
                );
                Err(ExError::from(err)
                    .with_op(op)
                    .with_request_id(ctx.request_id))
            }
        }
    }

    /// Undo the most recent command
    ///
    /// Never fails outright; the outcome says what happened. Only a
    /// successful undo or a failed inverse empties the slot.
    pub fn undo(&mut self) -> UndoOutcome {
        let top = self.stack.peek().map(ExecutedCommand::command);
        let ctx = RequestContext::new(top.map_or("none", Command::word));
        log_op_start!("undo", request_id = %ctx.request_id, command = %ctx.command);
        let start = Instant::now();

        let outcome = match top.map(Command::is_read_only) {
            None => UndoOutcome::NothingToUndo,
            Some(true) => UndoOutcome::NotUndoable,
            Some(false) => self.undo_top(&ctx),
        };

        if let UndoOutcome::Failed(err) = &outcome {
            log_op_error!(
                "undo",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id
            );
        } else {
            log_op_end!(
                "undo",
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id,
                undone = outcome.is_undone()
            );
        }

        outcome
    }

    fn undo_top(&mut self, ctx: &RequestContext) -> UndoOutcome {
        let Some(executed) = self.stack.take() else {
            return UndoOutcome::NothingToUndo;
        };
        let op = executed.command().word();
        let message = format!("Undone: {}", executed.message());

        match executed.undo(&mut self.store) {
            Ok(true) => UndoOutcome::Undone(message),
            Ok(false) => UndoOutcome::NotUndoable,
            Err(err) => UndoOutcome::Failed(
                ExError::from(err)
                    .with_op(op)
                    .with_request_id(ctx.request_id.clone()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Name, Phone, StudentNumber, TutorialGroup};

    fn add(name: &str, number: &str) -> Command {
        Command::AddStudent {
            name: Name::new(name).unwrap(),
            phone: Phone::new("91234567").unwrap(),
            tutorial_group: TutorialGroup::new("T01").unwrap(),
            student_number: StudentNumber::new(number).unwrap(),
        }
    }

    #[test]
    fn test_undo_on_fresh_session() {
        let mut session = Session::default();
        let outcome = session.undo();
        assert!(matches!(outcome, UndoOutcome::NothingToUndo));
        assert_eq!(outcome.message(), "There are no commands to undo");
    }

    #[test]
    fn test_undo_clears_slot() {
        let mut session = Session::default();
        session.execute(add("John Ng", "A1234567X")).unwrap();

        let outcome = session.undo();
        assert!(outcome.is_undone());
        assert_eq!(
            outcome.message(),
            "Undone: New student added: John Ng (A1234567X)"
        );
        assert!(session.stack().is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_not_undoable_keeps_slot() {
        let mut session = Session::default();
        session.execute(add("John Ng", "A1234567X")).unwrap();
        session
            .execute(Command::ListStudents {
                tutorial_group: None,
            })
            .unwrap();

        let outcome = session.undo();
        assert!(matches!(outcome, UndoOutcome::NotUndoable));
        assert_eq!(outcome.message(), "The previous command is not undoable");
        assert!(!session.stack().is_empty());
        assert_eq!(session.store().len(), 1);

        // The query still occupies the slot
        assert!(matches!(session.undo(), UndoOutcome::NotUndoable));
    }

    #[test]
    fn test_failed_command_leaves_slot() {
        let mut session = Session::default();
        session.execute(add("John Ng", "A1234567X")).unwrap();

        let err = session.execute(add("Jane Lim", "A1234567X")).unwrap_err();
        assert_eq!(err.code(), "ERR_DUPLICATE_IDENTITY");
        assert_eq!(err.op(), Some("add_student"));
        assert!(err.request_id().is_some());

        // Undo still reverses the first add
        assert!(session.undo().is_undone());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_command_stack_overwrites() {
        let mut session = Session::default();
        session.execute(add("Alice", "A1111111A")).unwrap();
        session.execute(add("Bob", "A2222222B")).unwrap();

        let top = session.stack().peek().unwrap();
        assert!(top.message().contains("Bob"));
    }

    #[test]
    fn test_default_config_warns_on_collisions() {
        assert!(SessionConfig::default().warn_on_name_collisions);
    }
}
