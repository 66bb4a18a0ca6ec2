//! Differential test harness.
//!
//! Drives a [`Storage`] and a [`SnapshotModel`] with the same commands and
//! panics as soon as they disagree.

use crate::model::SnapshotModel;
use undokv_core::{Command, Output, Storage};

/// Runs the engine and the reference model side by side.
pub struct IntegrationHarness {
    /// The engine under test.
    pub storage: Storage,
    /// The reference model.
    model: SnapshotModel,
    /// Commands applied so far, for failure messages.
    history: Vec<Command>,
}

impl Default for IntegrationHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationHarness {
    /// Creates a harness over an empty engine.
    pub fn new() -> Self {
        Self {
            storage: Storage::new(),
            model: SnapshotModel::new(),
            history: Vec::new(),
        }
    }

    /// Applies `command` to both sides and checks that they report the same
    /// output.
    ///
    /// # Panics
    ///
    /// Panics if the outputs differ or the engine rejects the command.
    pub fn apply(&mut self, command: Command) -> Output {
        let expected = self.model.apply(&command);
        self.history.push(command.clone());
        let actual = self
            .storage
            .execute(command)
            .unwrap_or_else(|e| panic!("engine rejected command: {e}\n{}", self.trace()));

        assert_eq!(actual, expected, "output mismatch\n{}", self.trace());
        actual
    }

    /// Applies every command in order.
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Checks that the table contents and nesting depth agree.
    ///
    /// # Panics
    ///
    /// Panics on any difference.
    pub fn verify(&self) {
        assert_eq!(
            self.storage.entries(),
            self.model.entries(),
            "table mismatch\n{}",
            self.trace()
        );
        assert_eq!(
            self.storage.depth(),
            self.model.depth(),
            "depth mismatch\n{}",
            self.trace()
        );
    }

    /// Returns the commands applied so far.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    fn trace(&self) -> String {
        let lines: Vec<String> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!("  {i:>4}: {cmd}"))
            .collect();
        format!("after:\n{}", lines.join("\n"))
    }
}
