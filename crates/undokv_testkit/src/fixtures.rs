//! Test fixtures and script helpers.

use undokv_core::{Command, Output, Storage};

/// Creates an engine pre-populated with `entries`, outside any transaction.
///
/// # Panics
///
/// Panics if an entry has an empty key.
pub fn seeded_storage(entries: &[(&str, &str)]) -> Storage {
    let storage = Storage::new();
    for (key, value) in entries {
        storage
            .set(*key, *value)
            .expect("Failed to seed entry");
    }
    storage
}

/// Executes `commands` in order and returns every reported output.
///
/// Outputs of commands that report nothing are left out.
///
/// # Panics
///
/// Panics if the engine rejects a command.
pub fn run_script(storage: &Storage, commands: &[Command]) -> Vec<Output> {
    commands
        .iter()
        .cloned()
        .map(|cmd| storage.execute(cmd).expect("Failed to execute command"))
        .filter(Output::is_reported)
        .collect()
}

/// Renders outputs the way the shell prints them, one per line.
pub fn render(outputs: &[Output]) -> Vec<String> {
    outputs.iter().map(ToString::to_string).collect()
}

/// Per-value counts computed from the table contents.
pub fn count_by_scan(storage: &Storage, value: &str) -> usize {
    storage
        .entries()
        .iter()
        .filter(|(_, v)| v == value)
        .count()
}
