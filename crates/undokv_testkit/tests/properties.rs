//! Property tests for the engine.

use proptest::prelude::*;
use undokv_core::{Command, Output, RollbackOutcome, Storage};
use undokv_testkit::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn engine_matches_snapshot_model(script in script_strategy(80)) {
        let mut harness = IntegrationHarness::new();
        harness.apply_all(script);
        harness.verify();
    }

    #[test]
    fn delete_is_idempotent(
        setup in data_script_strategy(20),
        key in key_strategy(),
    ) {
        let storage = Storage::new();
        run_script(&storage, &setup);

        storage.delete(&key).unwrap();
        let once = storage.entries();
        storage.delete(&key).unwrap();

        prop_assert_eq!(storage.entries(), once);
        prop_assert_eq!(storage.get(&key).unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips(
        setup in script_strategy(20),
        key in wide_key_strategy(),
        value in "[ -~]{0,12}",
    ) {
        let storage = Storage::new();
        run_script(&storage, &setup);

        storage.set(key.as_str(), value.as_str()).unwrap();
        prop_assert_eq!(storage.get(&key).unwrap(), Some(value));
    }

    #[test]
    fn count_matches_table_scan(
        script in script_strategy(60),
        value in value_strategy(),
    ) {
        let storage = Storage::new();
        run_script(&storage, &script);
        prop_assert_eq!(storage.count(&value), count_by_scan(&storage, &value));
    }

    #[test]
    fn rollback_undoes_exactly_one_level(
        setup in data_script_strategy(20),
        outer in data_script_strategy(20),
        inner in data_script_strategy(20),
    ) {
        let storage = Storage::new();
        run_script(&storage, &setup);
        storage.begin();
        run_script(&storage, &outer);
        let before_inner = storage.entries();

        storage.begin();
        run_script(&storage, &inner);
        let outcome = storage.rollback();

        prop_assert!(matches!(outcome, RollbackOutcome::Undone { .. }), "inner frame was undone");
        prop_assert_eq!(storage.entries(), before_inner);
        prop_assert_eq!(storage.depth(), 1);
    }

    #[test]
    fn commit_finalizes_every_level(
        levels in prop::collection::vec(data_script_strategy(10), 1..6),
    ) {
        let storage = Storage::new();
        for level in &levels {
            storage.begin();
            run_script(&storage, level);
        }
        let committed = storage.entries();

        storage.commit();
        prop_assert_eq!(storage.depth(), 0);
        prop_assert_eq!(storage.execute(Command::Rollback).unwrap(), Output::NoTransaction);
        prop_assert_eq!(storage.entries(), committed);
    }

    #[test]
    fn rollback_without_transaction_changes_nothing(setup in data_script_strategy(30)) {
        let storage = Storage::new();
        run_script(&storage, &setup);
        let before = storage.entries();

        prop_assert_eq!(storage.rollback(), RollbackOutcome::NoTransaction);
        prop_assert_eq!(storage.entries(), before);
    }

    #[test]
    fn repeated_writes_roll_back_to_pre_frame_value(
        key in key_strategy(),
        initial in prop::option::of(value_strategy()),
        writes in prop::collection::vec(prop::option::of(value_strategy()), 1..20),
    ) {
        let storage = Storage::new();
        if let Some(value) = &initial {
            storage.set(key.as_str(), value.as_str()).unwrap();
        }

        storage.begin();
        for write in &writes {
            match write {
                Some(value) => storage.set(key.as_str(), value.as_str()).unwrap(),
                None => {
                    storage.delete(&key).unwrap();
                }
            }
        }
        // At most one compensation per key per frame.
        prop_assert!(storage.undo_len() <= 1);
        storage.rollback();

        prop_assert_eq!(storage.get(&key).unwrap(), initial);
    }
}
