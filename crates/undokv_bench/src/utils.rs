//! Benchmark utilities.

use rand::Rng;
use undokv_core::{Config, Storage};

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key:{i}")).collect()
}

/// Generate `count` values drawn from `distinct` possibilities.
pub fn random_values(count: usize, distinct: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| rng.gen_range(0..distinct).to_string())
        .collect()
}

/// Create an engine holding `count` entries whose values cycle through
/// `distinct` possibilities.
pub fn populated_storage(count: usize, distinct: usize) -> Storage {
    let storage = Storage::with_config(
        Config::default()
            .initial_capacity(count)
            .collect_stats(false),
    );
    for (key, value) in generate_keys(count)
        .into_iter()
        .zip(random_values(count, distinct))
    {
        storage.set(key, value).expect("Failed to seed entry");
    }
    storage
}
