//! Nested transactions backed by an undo log.
//!
//! Every open transaction owns an [`UndoFrame`]: the compensating commands
//! that put the table back the way it was when the transaction began. The
//! frames form a [`TransactionStack`]:
//!
//! - `BEGIN` pushes an empty frame
//! - `ROLLBACK` replays the top frame in append order, then pops it
//! - `COMMIT` drops every frame without replaying anything
//!
//! With no frame open nothing is recorded, so an engine that never begins a
//! transaction pays nothing for the undo machinery.

mod frame;
mod stack;

pub use frame::UndoFrame;
pub use stack::TransactionStack;
