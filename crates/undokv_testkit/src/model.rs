//! Snapshot-based reference model.
//!
//! [`SnapshotModel`] implements the same command semantics as the engine in
//! the most obvious way: `BEGIN` copies the whole table, `ROLLBACK` restores
//! the copy, `COMMIT` forgets every copy. It is far too expensive for real
//! use but easy to trust, which makes it a good oracle for the undo log.

use std::collections::HashMap;
use undokv_core::{Command, Output};

/// Reference implementation of the command semantics.
#[derive(Debug, Default, Clone)]
pub struct SnapshotModel {
    table: HashMap<String, String>,
    snapshots: Vec<HashMap<String, String>>,
}

impl SnapshotModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a command and returns what the engine should report.
    pub fn apply(&mut self, command: &Command) -> Output {
        match command {
            Command::Set { key, value } => {
                self.table.insert(key.clone(), value.clone());
                Output::None
            }
            Command::Get { key } => Output::from_lookup(self.table.get(key).cloned()),
            Command::Delete { key } => {
                self.table.remove(key);
                Output::None
            }
            Command::Count { value } => {
                Output::Count(self.table.values().filter(|v| *v == value).count())
            }
            Command::Begin => {
                self.snapshots.push(self.table.clone());
                Output::None
            }
            Command::Rollback => match self.snapshots.pop() {
                Some(snapshot) => {
                    self.table = snapshot;
                    Output::None
                }
                None => Output::NoTransaction,
            },
            Command::Commit => {
                self.snapshots.clear();
                Output::None
            }
        }
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns every entry, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .table
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}
