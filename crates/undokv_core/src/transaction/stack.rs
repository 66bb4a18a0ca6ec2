//! The stack of open undo frames.

use crate::command::Command;
use crate::transaction::frame::UndoFrame;
use crate::types::TransactionId;

/// Ordered undo frames; the last one belongs to the innermost transaction.
///
/// Depth 0 means no transaction is open. `BEGIN` increments the depth,
/// `COMMIT` resets it to 0, `ROLLBACK` decrements it.
#[derive(Debug)]
pub struct TransactionStack {
    frames: Vec<UndoFrame>,
    next_id: u64,
}

impl Default for TransactionStack {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            next_id: 1,
        }
    }
}

impl TransactionStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no transaction is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the innermost frame.
    #[must_use]
    pub fn top(&self) -> Option<&UndoFrame> {
        self.frames.last()
    }

    /// Returns the open frames, outermost first.
    pub fn frames(&self) -> impl Iterator<Item = &UndoFrame> {
        self.frames.iter()
    }

    /// Pushes a new empty frame and returns its id.
    pub fn begin(&mut self) -> TransactionId {
        let id = TransactionId::new(self.next_id);
        self.next_id += 1;
        self.frames.push(UndoFrame::new(id));
        id
    }

    /// Drops every frame, returning how many were open.
    pub fn commit(&mut self) -> usize {
        let depth = self.frames.len();
        self.frames.clear();
        depth
    }

    /// Records the undo of a `SET` on the innermost frame, if any.
    pub fn record_set(&mut self, key: &str, prior: Option<&str>) -> bool {
        self.frames
            .last_mut()
            .is_some_and(|frame| frame.record_set(key, prior))
    }

    /// Records the undo of a `DELETE` on the innermost frame, if any.
    pub fn record_delete(&mut self, key: &str, prior: Option<&str>) -> bool {
        self.frames
            .last_mut()
            .is_some_and(|frame| frame.record_delete(key, prior))
    }

    /// Copies the innermost frame's compensations for replay.
    #[must_use]
    pub fn snapshot_top(&self) -> Option<(TransactionId, Vec<Command>)> {
        self.top()
            .map(|frame| (frame.id(), frame.commands().to_vec()))
    }

    /// Removes the frame with the given id.
    ///
    /// Normally that frame is on top. If another caller has pushed frames
    /// above it since, it is removed from where it sits. Returns `None` if
    /// the frame is gone (for example after a `COMMIT`).
    pub fn remove(&mut self, id: TransactionId) -> Option<UndoFrame> {
        if self.top().is_some_and(|frame| frame.id() == id) {
            return self.frames.pop();
        }
        let index = self.frames.iter().position(|frame| frame.id() == id)?;
        Some(self.frames.remove(index))
    }
}
