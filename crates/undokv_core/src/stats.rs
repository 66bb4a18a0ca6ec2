//! Engine statistics.
//!
//! Operation counters for monitoring how an engine is being driven.
//!
//! # Usage
//!
//! ```rust
//! use undokv_core::Storage;
//!
//! let storage = Storage::new();
//! storage.set("a", "10").unwrap();
//! storage.get("a").unwrap();
//!
//! let stats = storage.stats().snapshot();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Engine statistics.
///
/// All counters are atomic and can be read while operations are in progress.
/// Values only ever increase. When disabled, every `record_*` call is a no-op.
#[derive(Debug)]
pub struct EngineStats {
    enabled: bool,

    // Table operations
    gets: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    counts: AtomicU64,

    // Transaction control
    begins: AtomicU64,
    commits: AtomicU64,
    rollbacks: AtomicU64,
    /// Rollbacks issued with no open transaction.
    empty_rollbacks: AtomicU64,
    /// Compensating commands replayed by rollbacks.
    replayed: AtomicU64,
}

impl Default for EngineStats {
    fn default() -> Self {
        Self::with_enabled(true)
    }
}

impl EngineStats {
    /// Creates an enabled stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stats instance that counts only if `enabled` is true.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            gets: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            counts: AtomicU64::new(0),
            begins: AtomicU64::new(0),
            commits: AtomicU64::new(0),
            rollbacks: AtomicU64::new(0),
            empty_rollbacks: AtomicU64::new(0),
            replayed: AtomicU64::new(0),
        }
    }

    /// Returns true if counters are being updated.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn bump(&self, counter: &AtomicU64, by: u64) {
        if self.enabled {
            counter.fetch_add(by, Ordering::Relaxed);
        }
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_get(&self) {
        self.bump(&self.gets, 1);
    }

    pub(crate) fn record_set(&self) {
        self.bump(&self.sets, 1);
    }

    pub(crate) fn record_delete(&self) {
        self.bump(&self.deletes, 1);
    }

    pub(crate) fn record_count(&self) {
        self.bump(&self.counts, 1);
    }

    pub(crate) fn record_begin(&self) {
        self.bump(&self.begins, 1);
    }

    pub(crate) fn record_commit(&self) {
        self.bump(&self.commits, 1);
    }

    /// Records a rollback that replayed `replayed` compensations.
    pub(crate) fn record_rollback(&self, replayed: usize) {
        self.bump(&self.rollbacks, 1);
        self.bump(&self.replayed, replayed as u64);
    }

    pub(crate) fn record_empty_rollback(&self) {
        self.bump(&self.empty_rollbacks, 1);
    }

    // === Getter methods (public API) ===

    /// Returns the number of `GET` operations.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns the number of `SET` operations, replayed ones included.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the number of `DELETE` operations, replayed ones included.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of `COUNT` scans.
    pub fn counts(&self) -> u64 {
        self.counts.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions begun.
    pub fn begins(&self) -> u64 {
        self.begins.load(Ordering::Relaxed)
    }

    /// Returns the number of `COMMIT` operations.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions rolled back.
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks.load(Ordering::Relaxed)
    }

    /// Returns the number of rollbacks that found no open transaction.
    pub fn empty_rollbacks(&self) -> u64 {
        self.empty_rollbacks.load(Ordering::Relaxed)
    }

    /// Returns the number of compensating commands replayed.
    pub fn replayed(&self) -> u64 {
        self.replayed.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets(),
            sets: self.sets(),
            deletes: self.deletes(),
            counts: self.counts(),
            begins: self.begins(),
            commits: self.commits(),
            rollbacks: self.rollbacks(),
            empty_rollbacks: self.empty_rollbacks(),
            replayed: self.replayed(),
        }
    }
}

/// A point-in-time snapshot of engine statistics.
///
/// Unlike `EngineStats`, this is a plain struct that can be serialized,
/// compared, or passed across threads without atomics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Number of `GET` operations.
    pub gets: u64,
    /// Number of `SET` operations.
    pub sets: u64,
    /// Number of `DELETE` operations.
    pub deletes: u64,
    /// Number of `COUNT` scans.
    pub counts: u64,
    /// Number of transactions begun.
    pub begins: u64,
    /// Number of `COMMIT` operations.
    pub commits: u64,
    /// Number of transactions rolled back.
    pub rollbacks: u64,
    /// Number of rollbacks with no open transaction.
    pub empty_rollbacks: u64,
    /// Number of compensating commands replayed.
    pub replayed: u64,
}
