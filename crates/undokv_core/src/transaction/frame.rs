//! Undo frame of a single transaction.

use crate::command::Command;
use crate::types::TransactionId;
use std::collections::HashSet;

/// Compensating commands for one nested transaction.
///
/// A frame records at most one compensation per key: the one computed from
/// the value the key held when the frame first touched it. Because those
/// compensations target distinct keys they commute, and replaying them in
/// append order restores every touched key to its pre-frame value.
#[derive(Debug, Clone)]
pub struct UndoFrame {
    id: TransactionId,
    commands: Vec<Command>,
    touched: HashSet<String>,
}

impl UndoFrame {
    /// Creates an empty frame.
    pub(crate) fn new(id: TransactionId) -> Self {
        Self {
            id,
            commands: Vec::new(),
            touched: HashSet::new(),
        }
    }

    /// Returns the transaction this frame belongs to.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the recorded compensations in append order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the number of recorded compensations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Records the compensation for overwriting `key`, whose current value
    /// is `prior`.
    ///
    /// Returns true if a command was appended.
    pub(crate) fn record_set(&mut self, key: &str, prior: Option<&str>) -> bool {
        if self.touched.contains(key) {
            return false;
        }
        let undo = match prior {
            Some(value) => Command::set(key, value),
            None => Command::delete(key),
        };
        self.push(key, undo);
        true
    }

    /// Records the compensation for deleting `key`, whose current value is
    /// `prior`.
    ///
    /// Deleting an absent key changes nothing and records nothing.
    pub(crate) fn record_delete(&mut self, key: &str, prior: Option<&str>) -> bool {
        match prior {
            Some(value) if !self.touched.contains(key) => {
                self.push(key, Command::set(key, value));
                true
            }
            _ => false,
        }
    }

    fn push(&mut self, key: &str, undo: Command) {
        self.touched.insert(key.to_owned());
        self.commands.push(undo);
    }
}
