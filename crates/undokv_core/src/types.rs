//! Core type definitions for UndoKV.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one nested transaction scope.
///
/// Assigned at `BEGIN`, monotonically increasing and never reused for the
/// lifetime of a [`Storage`](crate::Storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl TransactionId {
    /// Creates a new transaction ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "txn:{}", self.0)
    }
}
