//! Property-based test generators using proptest.
//!
//! Key and value spaces are kept small so that generated scripts overwrite,
//! delete and count the same entries often.

use proptest::prelude::*;
use undokv_core::Command;

/// Strategy for keys drawn from a small fixed set.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(str::to_owned)
}

/// Strategy for arbitrary non-empty keys without whitespace.
pub fn wide_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_:.-]{1,16}").expect("Invalid regex")
}

/// Strategy for values drawn from a small fixed set.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["10", "20", "30", "40"]).prop_map(str::to_owned)
}

/// Strategy for table-only commands (no transaction control).
pub fn data_command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Command::set(k, v)),
        2 => key_strategy().prop_map(|k| Command::get(k)),
        2 => key_strategy().prop_map(|k| Command::delete(k)),
        1 => value_strategy().prop_map(|v| Command::count(v)),
    ]
}

/// Strategy for any command.
pub fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        9 => data_command_strategy(),
        2 => Just(Command::Begin),
        2 => Just(Command::Rollback),
        1 => Just(Command::Commit),
    ]
}

/// Strategy for scripts of up to `max_len` commands.
pub fn script_strategy(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command_strategy(), 0..max_len)
}

/// Strategy for scripts of table-only commands.
pub fn data_script_strategy(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(data_command_strategy(), 0..max_len)
}
