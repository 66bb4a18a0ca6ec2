//! Stress tests for UndoKV.
//!
//! These helpers exercise the engine under heavy load and concurrent access.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use undokv_core::{Command, CoreResult, Storage};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations to perform (split across threads when concurrent).
    pub operations: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Number of distinct keys.
    pub key_count: usize,
    /// Number of distinct values.
    pub value_count: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 10_000,
            threads: 4,
            key_count: 1_000,
            value_count: 10,
        }
    }
}

/// Tallies outcomes across threads.
#[derive(Default)]
struct Tally {
    successful: AtomicUsize,
    failed: AtomicUsize,
}

impl Tally {
    fn record<T>(&self, result: CoreResult<T>) {
        let counter = if result.is_ok() {
            &self.successful
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self, start: Instant) -> StressTestResult {
        StressTestResult::new(
            self.successful.load(Ordering::Relaxed),
            self.failed.load(Ordering::Relaxed),
            start.elapsed(),
        )
    }
}

/// Run a sequential write stress test.
pub fn stress_sequential_writes(storage: &Storage, config: &StressConfig) -> StressTestResult {
    let tally = Tally::default();
    let start = Instant::now();

    for i in 0..config.operations {
        let key = format!("key:{}", i % config.key_count);
        let value = format!("{}", i % config.value_count);
        tally.record(storage.set(key, value));
    }

    tally.finish(start)
}

/// Run a random mix of table commands inside and outside transactions.
pub fn stress_mixed_operations(storage: &Storage, config: &StressConfig) -> StressTestResult {
    let mut rng = rand::thread_rng();
    let tally = Tally::default();
    let start = Instant::now();

    for _ in 0..config.operations {
        let key = format!("key:{}", rng.gen_range(0..config.key_count));
        let value = format!("{}", rng.gen_range(0..config.value_count));

        let command = match rng.gen_range(0..100) {
            0..=39 => Command::set(key, value),
            40..=64 => Command::get(key),
            65..=79 => Command::delete(key),
            80..=89 => Command::count(value),
            90..=94 => Command::Begin,
            95..=98 => Command::Rollback,
            _ => Command::Commit,
        };
        tally.record(storage.execute(command));
    }

    tally.finish(start)
}

/// Opens `depth` nested transactions, each overwriting every key, then
/// rolls all of them back one at a time.
pub fn stress_nested_rollbacks(
    storage: &Storage,
    depth: usize,
    config: &StressConfig,
) -> StressTestResult {
    let tally = Tally::default();
    let start = Instant::now();

    for level in 0..depth {
        storage.begin();
        for k in 0..config.key_count {
            let key = format!("key:{k}");
            tally.record(storage.set(key, format!("level:{level}")));
        }
    }
    for _ in 0..depth {
        storage.rollback();
    }

    tally.finish(start)
}

/// Run concurrent writers, each on its own key range.
///
/// Thread `t` writes keys `t{t}:key:{i}`, so the final table holds
/// `threads * min(key_count, operations / threads)` entries.
pub fn stress_concurrent_writes(storage: Arc<Storage>, config: &StressConfig) -> StressTestResult {
    let tally = Arc::new(Tally::default());
    let ops_per_thread = config.operations / config.threads;
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let storage = Arc::clone(&storage);
            let tally = Arc::clone(&tally);
            let key_count = config.key_count;

            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("t{t}:key:{}", i % key_count);
                    tally.record(storage.set(key, i.to_string()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    tally.finish(start)
}

/// Run concurrent readers (`GET` and `COUNT`) against concurrent writers.
pub fn stress_concurrent_reads_and_writes(
    storage: Arc<Storage>,
    config: &StressConfig,
) -> StressTestResult {
    let tally = Arc::new(Tally::default());
    let ops_per_thread = config.operations / config.threads;
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let storage = Arc::clone(&storage);
            let tally = Arc::clone(&tally);
            let key_count = config.key_count;
            let value_count = config.value_count;

            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("key:{}", i % key_count);
                    let value = (i % value_count).to_string();
                    let command = if t % 2 == 0 {
                        Command::set(key, value)
                    } else if i % 2 == 0 {
                        Command::get(key)
                    } else {
                        Command::count(value)
                    };
                    tally.record(storage.execute(command));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    tally.finish(start)
}

/// Run concurrent transaction control on a single engine.
///
/// All threads share one transaction stack, so the resulting table state is
/// not predictable; this checks that replaying rollbacks never deadlocks
/// against concurrent writers and that the engine ends in a usable state.
pub fn stress_concurrent_transactions(
    storage: Arc<Storage>,
    config: &StressConfig,
) -> StressTestResult {
    let tally = Arc::new(Tally::default());
    let ops_per_thread = config.operations / config.threads;
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let storage = Arc::clone(&storage);
            let tally = Arc::clone(&tally);
            let key_count = config.key_count;

            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = format!("t{t}:key:{}", i % key_count);
                    let command = match i % 6 {
                        0 => Command::Begin,
                        1 | 2 => Command::set(key, i.to_string()),
                        3 => Command::delete(key),
                        4 => Command::Rollback,
                        _ if i % 12 == 5 => Command::Commit,
                        _ => Command::get(key),
                    };
                    tally.record(storage.execute(command));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    tally.finish(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> StressConfig {
        StressConfig {
            operations: 1_000,
            threads: 4,
            key_count: 50,
            value_count: 5,
        }
    }

    #[test]
    fn test_sequential_writes() {
        let storage = Storage::new();
        let result = stress_sequential_writes(&storage, &small_config());

        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.successful_ops, 1_000);
        assert_eq!(storage.len(), 50);
    }

    #[test]
    fn test_mixed_operations() {
        let storage = Storage::new();
        let result = stress_mixed_operations(&storage, &small_config());
        assert_eq!(result.failed_ops, 0);
        assert_eq!(result.total_ops, 1_000);
    }

    #[test]
    fn test_nested_rollbacks_restore_original_table() {
        let storage = Storage::new();
        storage.set("key:0", "original").unwrap();
        let before = storage.entries();

        let result = stress_nested_rollbacks(&storage, 20, &small_config());

        assert_eq!(result.failed_ops, 0);
        assert_eq!(storage.depth(), 0);
        assert_eq!(storage.entries(), before);
    }

    #[test]
    fn test_concurrent_writes() {
        let storage = Arc::new(Storage::new());
        let result = stress_concurrent_writes(Arc::clone(&storage), &small_config());

        assert_eq!(result.failed_ops, 0);
        assert_eq!(storage.len(), 4 * 50);
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let storage = Arc::new(Storage::new());
        let result = stress_concurrent_reads_and_writes(Arc::clone(&storage), &small_config());
        assert_eq!(result.failed_ops, 0);
    }

    #[test]
    fn test_concurrent_transactions_finish() {
        let storage = Arc::new(Storage::new());
        let result = stress_concurrent_transactions(Arc::clone(&storage), &small_config());
        assert_eq!(result.failed_ops, 0);

        storage.commit();
        assert_eq!(storage.depth(), 0);
        storage.set("after", "1").unwrap();
        assert_eq!(storage.get("after").unwrap().as_deref(), Some("1"));
    }
}
