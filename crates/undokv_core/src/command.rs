//! Structured commands and their reported outputs.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker reported by `GET` for an absent key.
pub const NULL_MARKER: &str = "NULL";

/// Status reported by `ROLLBACK` when no transaction is open.
pub const NO_TRANSACTION: &str = "NO TRANSACTION";

/// The kind of a [`Command`], independent of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandKind {
    /// Store a value under a key.
    Set,
    /// Read the value stored under a key.
    Get,
    /// Remove a key.
    Delete,
    /// Count entries holding a value.
    Count,
    /// Open a nested transaction.
    Begin,
    /// Undo the innermost transaction.
    Rollback,
    /// Finalize every open transaction.
    Commit,
}

impl CommandKind {
    /// All command kinds, in keyword order.
    pub const ALL: [CommandKind; 7] = [
        CommandKind::Set,
        CommandKind::Get,
        CommandKind::Delete,
        CommandKind::Count,
        CommandKind::Begin,
        CommandKind::Rollback,
        CommandKind::Commit,
    ];

    /// Returns the upper-case keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            CommandKind::Set => "SET",
            CommandKind::Get => "GET",
            CommandKind::Delete => "DELETE",
            CommandKind::Count => "COUNT",
            CommandKind::Begin => "BEGIN",
            CommandKind::Rollback => "ROLLBACK",
            CommandKind::Commit => "COMMIT",
        }
    }

    /// Returns true for kinds that take a key.
    #[must_use]
    pub const fn takes_key(self) -> bool {
        matches!(self, CommandKind::Set | CommandKind::Get | CommandKind::Delete)
    }

    /// Returns true for kinds that take a value.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(self, CommandKind::Set | CommandKind::Count)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CommandKind {
    type Err = CoreError;

    /// Parses a keyword, ignoring ASCII case.
    fn from_str(s: &str) -> CoreResult<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::invalid_command(format!("unknown keyword '{s}'")))
    }
}

/// A structured command, as consumed by [`Storage::execute`](crate::Storage::execute).
///
/// Each variant carries exactly the arguments its kind requires. Commands
/// are plain owned values; the undo log stores them as compensations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum Command {
    /// `SET key value`
    Set {
        /// Target key.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `DELETE key`
    Delete {
        /// Key to remove.
        key: String,
    },
    /// `COUNT value`
    Count {
        /// Value to match exactly.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
}

impl Command {
    /// Creates a `SET` command.
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Command::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a `GET` command.
    pub fn get(key: impl Into<String>) -> Self {
        Command::Get { key: key.into() }
    }

    /// Creates a `DELETE` command.
    pub fn delete(key: impl Into<String>) -> Self {
        Command::Delete { key: key.into() }
    }

    /// Creates a `COUNT` command.
    pub fn count(value: impl Into<String>) -> Self {
        Command::Count {
            value: value.into(),
        }
    }

    /// Returns the kind of this command.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Set { .. } => CommandKind::Set,
            Command::Get { .. } => CommandKind::Get,
            Command::Delete { .. } => CommandKind::Delete,
            Command::Count { .. } => CommandKind::Count,
            Command::Begin => CommandKind::Begin,
            Command::Rollback => CommandKind::Rollback,
            Command::Commit => CommandKind::Commit,
        }
    }

    /// Returns the key, for kinds that take one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Command::Set { key, .. } | Command::Get { key } | Command::Delete { key } => {
                Some(key)
            }
            _ => None,
        }
    }

    /// Returns the value, for kinds that take one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Command::Set { value, .. } | Command::Count { value } => Some(value),
            _ => None,
        }
    }

    /// Checks that keyed commands carry a non-empty key.
    pub fn validate(&self) -> CoreResult<()> {
        match self.key() {
            Some("") => Err(CoreError::empty_key(self.kind())),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { key, value } => write!(f, "SET {key} {value}"),
            Command::Get { key } => write!(f, "GET {key}"),
            Command::Delete { key } => write!(f, "DELETE {key}"),
            Command::Count { value } => write!(f, "COUNT {value}"),
            Command::Begin => f.write_str("BEGIN"),
            Command::Rollback => f.write_str("ROLLBACK"),
            Command::Commit => f.write_str("COMMIT"),
        }
    }
}

/// What dispatching a command reports to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing is reported (side effect only).
    None,
    /// `GET` found a value.
    Value(String),
    /// `GET` found no entry for the key.
    Null,
    /// Result of `COUNT`.
    Count(usize),
    /// `ROLLBACK` was issued with no open transaction.
    NoTransaction,
}

impl Output {
    /// Builds the `GET` output from a lookup result.
    #[must_use]
    pub fn from_lookup(value: Option<String>) -> Self {
        value.map_or(Output::Null, Output::Value)
    }

    /// Returns true if this output should be shown to the caller.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        !matches!(self, Output::None)
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::None => Ok(()),
            Output::Value(value) => f.write_str(value),
            Output::Null => f.write_str(NULL_MARKER),
            Output::Count(count) => write!(f, "{count}"),
            Output::NoTransaction => f.write_str(NO_TRANSACTION),
        }
    }
}
