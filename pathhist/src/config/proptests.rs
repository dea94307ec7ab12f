//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, PrefixConfig, TypeHandlers};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn prefix_strategy() -> impl Strategy<Value = PrefixConfig> {
    (
        "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
        prop::collection::vec("[a-z_]{1,12}", 1..4),
        "[a-z]{1,10}",
    )
        .prop_map(|(prefix, types, handler)| PrefixConfig {
            prefix,
            types: TypeHandlers::List(types),
            handler: Some(handler),
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[a-z][a-z_]{0,15}"),
        prop::option::of(300u16..=308),
        prop::option::of(prop::collection::vec(prefix_strategy(), 0..4)),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=600),
    )
        .prop_map(|(table, redirect_status, prefixes, cascade, wait)| Config {
            table,
            redirect_status,
            prefixes,
            cascade_soft_deleted: cascade,
            maximum_lock_wait_seconds: wait,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher-precedence source survives the merge
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.table, high.table.or(low.table));
        prop_assert_eq!(result.redirect_status, high.redirect_status.or(low.redirect_status));
        prop_assert_eq!(result.prefixes, high.prefixes.or(low.prefixes));
        prop_assert_eq!(
            result.cascade_soft_deleted,
            high.cascade_soft_deleted.or(low.cascade_soft_deleted)
        );
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
    }

    // Merging an empty config is the identity
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Merging is idempotent
    #[test]
    fn config_merge_idempotent(base in config_strategy(), over in config_strategy()) {
        let mut once = base.clone();
        ConfigMerger::merge_into(&mut once, &over);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &over);
        prop_assert_eq!(once, twice);
    }

    // Redirect statuses outside 300..=308 are always rejected
    #[test]
    fn non_redirect_status_rejected(status in any::<u16>()) {
        let config = Config { redirect_status: Some(status), ..Default::default() };
        let result = ConfigValidator::validate(&config);
        prop_assert_eq!(result.is_ok(), (300..=308).contains(&status));
    }

    // Prefix tables built from a validated config preserve entry order
    #[test]
    fn prefix_table_preserves_order(prefixes in prop::collection::vec(prefix_strategy(), 0..5)) {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<PrefixConfig> = prefixes
            .into_iter()
            .filter(|p| seen.insert(p.prefix.clone()))
            .collect();
        let config = Config { prefixes: Some(unique.clone()), ..Default::default() };
        ConfigValidator::validate(&config).unwrap();

        let table = config.prefix_table().unwrap();
        let order: Vec<&str> = table.entries().iter().map(|e| e.prefix()).collect();
        let expected: Vec<&str> = unique.iter().map(|p| p.prefix.as_str()).collect();
        prop_assert_eq!(order, expected);
    }
}
