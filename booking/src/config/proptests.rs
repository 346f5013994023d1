//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;
use std::path::PathBuf;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
        Just(OutputFormat::Table),
    ]
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("/[a-z]{1,10}/[a-z]{1,10}\\.db"),
        prop::option::of(1u64..=600),
        prop::option::of("[a-z]{1,20}"),
        prop::option::of(format_strategy()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(path, wait, principal, format, autoinit)| Config {
            database_path: path.map(PathBuf::from),
            maximum_lock_wait_seconds: wait,
            principal,
            output_format: format,
            disable_autoinit: autoinit,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Configuration merging keeps every Some from the higher layer
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.database_path, high.database_path.or(low.database_path));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.principal, high.principal.or(low.principal));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
    }

    // Merging a config into itself is a no-op
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Generated configs always validate, and survive a YAML round trip
    #[test]
    fn config_generated_is_valid(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
