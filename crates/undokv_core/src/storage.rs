//! The storage engine: table, transaction stack and command dispatch.

use crate::command::{Command, CommandKind, Output};
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::stats::EngineStats;
use crate::table::Table;
use crate::transaction::TransactionStack;
use crate::types::TransactionId;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

/// Result of a rollback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The innermost transaction was undone.
    Undone {
        /// The transaction that was rolled back.
        id: TransactionId,
        /// Number of compensating commands replayed.
        replayed: usize,
    },
    /// No transaction was open; nothing changed.
    NoTransaction,
}

/// State guarded by the engine lock.
#[derive(Debug)]
struct State {
    table: Table,
    transactions: TransactionStack,
}

/// An in-memory key/value engine with nested undo-log transactions.
///
/// `Storage` owns the table and the transaction stack behind a single
/// reader/writer lock. It is `Send + Sync`; share it between threads with
/// an `Arc`.
///
/// # Transactions
///
/// There is exactly one transaction stack per engine. `BEGIN` opens a nested
/// scope, `ROLLBACK` undoes the innermost scope only, and `COMMIT` finalizes
/// every open scope at once. Threads issuing transaction control against the
/// same engine share the same nesting depth.
///
/// ```rust
/// use undokv_core::Storage;
///
/// let storage = Storage::new();
/// storage.set("a", "10")?;
///
/// storage.begin();
/// storage.set("a", "20")?;
/// storage.begin();
/// storage.set("a", "30")?;
///
/// storage.rollback();
/// assert_eq!(storage.get("a")?.as_deref(), Some("20"));
/// storage.rollback();
/// assert_eq!(storage.get("a")?.as_deref(), Some("10"));
/// # Ok::<(), undokv_core::CoreError>(())
/// ```
///
/// # Locking
///
/// `GET` and `COUNT` take the shared lock; `SET`, `DELETE`, `BEGIN` and
/// `COMMIT` take the exclusive lock. `ROLLBACK` never holds the lock while
/// replaying: it copies the innermost frame under the shared lock, replays
/// each compensation through [`Storage::execute`]'s own dispatch path (each
/// taking its own lock), and finally pops the frame under a fresh exclusive
/// lock.
#[derive(Debug)]
pub struct Storage {
    config: Config,
    state: RwLock<State>,
    stats: EngineStats,
}

impl Default for Storage {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Storage {
    /// Creates an empty engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let state = State {
            table: Table::with_capacity(config.initial_capacity),
            transactions: TransactionStack::new(),
        };
        Self {
            stats: EngineStats::with_enabled(config.collect_stats),
            state: RwLock::new(state),
            config,
        }
    }

    /// Returns the configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the engine statistics.
    #[must_use]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Dispatches a structured command.
    ///
    /// `GET` reports [`Output::Value`] or [`Output::Null`], `COUNT` reports
    /// [`Output::Count`], and `ROLLBACK` with no open transaction reports
    /// [`Output::NoTransaction`]. Every other command reports
    /// [`Output::None`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyKey`] if a keyed command carries an empty
    /// key. Nothing is changed in that case.
    pub fn execute(&self, command: Command) -> CoreResult<Output> {
        command.validate()?;
        trace!(%command, "dispatch");
        Ok(self.dispatch(command))
    }

    /// Routes a validated command to its operation.
    ///
    /// Live commands and rollback compensations both come through here, so
    /// every mutation is logged against whatever frame is innermost.
    fn dispatch(&self, command: Command) -> Output {
        match command {
            Command::Set { key, value } => {
                self.apply_set(key, value);
                Output::None
            }
            Command::Get { key } => Output::from_lookup(self.lookup(&key)),
            Command::Delete { key } => {
                self.apply_delete(&key);
                Output::None
            }
            Command::Count { value } => Output::Count(self.count_matching(&value)),
            Command::Begin => {
                self.begin();
                Output::None
            }
            Command::Rollback => match self.rollback() {
                RollbackOutcome::Undone { .. } => Output::None,
                RollbackOutcome::NoTransaction => Output::NoTransaction,
            },
            Command::Commit => {
                self.commit();
                Output::None
            }
        }
    }

    // === Table operations ===

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyKey`] if `key` is empty.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> CoreResult<()> {
        let key = key.into();
        ensure_key(CommandKind::Set, &key)?;
        self.apply_set(key, value.into());
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyKey`] if `key` is empty.
    pub fn get(&self, key: &str) -> CoreResult<Option<String>> {
        ensure_key(CommandKind::Get, key)?;
        Ok(self.lookup(key))
    }

    /// Removes `key`. Returns true if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyKey`] if `key` is empty.
    pub fn delete(&self, key: &str) -> CoreResult<bool> {
        ensure_key(CommandKind::Delete, key)?;
        Ok(self.apply_delete(key))
    }

    /// Returns the number of entries whose value equals `value`.
    ///
    /// Scans the whole table under the shared lock.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.count_matching(value)
    }

    fn apply_set(&self, key: String, value: String) {
        let mut state = self.state.write();
        let State {
            table,
            transactions,
        } = &mut *state;
        transactions.record_set(&key, table.get(&key));
        table.insert(key, value);
        self.stats.record_set();
    }

    fn apply_delete(&self, key: &str) -> bool {
        let mut state = self.state.write();
        let State {
            table,
            transactions,
        } = &mut *state;
        transactions.record_delete(key, table.get(key));
        let removed = table.remove(key).is_some();
        self.stats.record_delete();
        removed
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let value = self.state.read().table.get(key).map(str::to_owned);
        self.stats.record_get();
        value
    }

    fn count_matching(&self, value: &str) -> usize {
        let count = self.state.read().table.count(value);
        self.stats.record_count();
        count
    }

    // === Transaction control ===

    /// Opens a nested transaction and returns its id.
    pub fn begin(&self) -> TransactionId {
        let mut state = self.state.write();
        let id = state.transactions.begin();
        self.stats.record_begin();
        debug!(%id, depth = state.transactions.depth(), "transaction begun");
        id
    }

    /// Finalizes every open transaction at once, returning how many were open.
    ///
    /// Nothing is replayed; a no-op when no transaction is open.
    pub fn commit(&self) -> usize {
        let committed = self.state.write().transactions.commit();
        self.stats.record_commit();
        debug!(committed, "transactions committed");
        committed
    }

    /// Undoes the innermost transaction.
    ///
    /// Compensations are replayed in the order they were recorded, each
    /// through the same dispatch path as a live command, while the frame
    /// being undone is still innermost. Frames below it are not touched.
    pub fn rollback(&self) -> RollbackOutcome {
        let snapshot = self.state.read().transactions.snapshot_top();
        let Some((id, commands)) = snapshot else {
            self.stats.record_empty_rollback();
            debug!("rollback with no open transaction");
            return RollbackOutcome::NoTransaction;
        };

        let replayed = commands.len();
        for command in commands {
            trace!(%id, %command, "replay");
            self.dispatch(command);
        }

        let mut state = self.state.write();
        if state.transactions.remove(id).is_none() {
            warn!(%id, "rolled-back transaction was closed during replay");
        }
        let depth = state.transactions.depth();
        drop(state);

        self.stats.record_rollback(replayed);
        debug!(%id, replayed, depth, "transaction rolled back");
        RollbackOutcome::Undone { id, replayed }
    }

    // === Introspection ===

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state.read().transactions.depth()
    }

    /// Returns true if a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.state.read().transactions.is_empty()
    }

    /// Returns the number of compensations recorded by the innermost
    /// transaction, or 0 when none is open.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.state
            .read()
            .transactions
            .top()
            .map_or(0, |frame| frame.len())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().table.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().table.is_empty()
    }

    /// Returns a copy of every entry, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let state = self.state.read();
        let mut entries: Vec<_> = state
            .table
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        drop(state);
        entries.sort();
        entries
    }
}

fn ensure_key(kind: CommandKind, key: &str) -> CoreResult<()> {
    if key.is_empty() {
        return Err(CoreError::empty_key(kind));
    }
    Ok(())
}
