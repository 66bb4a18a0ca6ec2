//! # UndoKV Core
//!
//! In-memory key-value engine with nested transactions.
//!
//! This crate provides:
//! - A key/value table of opaque text keys and values
//! - Nested `BEGIN`/`ROLLBACK`/`COMMIT` transactions backed by an undo log
//! - A dispatcher for structured [`Command`]s
//! - A single reader/writer lock making the engine safe to share across threads
//!
//! The engine is volatile: nothing is persisted.
//!
//! ## Example
//!
//! ```rust
//! use undokv_core::{Command, Output, Storage};
//!
//! let storage = Storage::new();
//! storage.execute(Command::set("a", "10"))?;
//! storage.execute(Command::set("b", "10"))?;
//! assert_eq!(storage.execute(Command::count("10"))?, Output::Count(2));
//!
//! storage.execute(Command::Begin)?;
//! storage.execute(Command::delete("b"))?;
//! assert_eq!(storage.execute(Command::get("b"))?, Output::Null);
//! storage.execute(Command::Rollback)?;
//! assert_eq!(storage.execute(Command::get("b"))?, Output::Value("10".into()));
//!
//! assert_eq!(storage.execute(Command::Rollback)?, Output::NoTransaction);
//! # Ok::<(), undokv_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod stats;
mod storage;
mod table;
mod transaction;
mod types;

pub use command::{Command, CommandKind, Output, NO_TRANSACTION, NULL_MARKER};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use stats::{EngineStats, StatsSnapshot};
pub use storage::{RollbackOutcome, Storage};
pub use table::Table;
pub use transaction::{TransactionStack, UndoFrame};
pub use types::TransactionId;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
