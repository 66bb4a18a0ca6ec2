//! Engine configuration.

/// Configuration for constructing a [`Storage`](crate::Storage).
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of entries to pre-allocate in the key/value table.
    pub initial_capacity: usize,

    /// Whether operation counters in [`EngineStats`](crate::EngineStats) are updated.
    pub collect_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            collect_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of table entries to pre-allocate.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets whether operation counters are updated.
    #[must_use]
    pub const fn collect_stats(mut self, value: bool) -> Self {
        self.collect_stats = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 0);
        assert!(config.collect_stats);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().initial_capacity(1024).collect_stats(false);

        assert_eq!(config.initial_capacity, 1024);
        assert!(!config.collect_stats);
    }
}
