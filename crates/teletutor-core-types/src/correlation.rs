//! Correlation types for request tracking
//!
//! Every request handed to a session gets its own id so that log lines and
//! returned errors can be tied back to the command that produced them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single request (one command or one undo)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    /// Command word the request acts on (for undo, the command being undone)
    pub command: String,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            command: command.into(),
        }
    }
}
