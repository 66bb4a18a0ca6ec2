//! Error types for UndoKV core.

use crate::command::CommandKind;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in UndoKV core operations.
///
/// The engine favors well-defined no-ops over errors: reading or deleting an
/// absent key and rolling back with no open transaction are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A keyed command was issued with an empty key.
    #[error("{kind} requires a non-empty key")]
    EmptyKey {
        /// The command that carried the empty key.
        kind: CommandKind,
    },

    /// A keyword does not name any command.
    #[error("invalid command: {message}")]
    InvalidCommand {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an empty key error.
    pub fn empty_key(kind: CommandKind) -> Self {
        Self::EmptyKey { kind }
    }

    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }
}
