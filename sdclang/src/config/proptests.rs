//! Property-based tests for configuration resolution.

use super::environment::{MapEnvironment, ENABLED_VAR, PRODUCT_VAR};
use super::loader::ConfigSource;
use super::merger::ConfigMerger;
use super::resolver::ToolchainResolver;
use super::schema::{AnalysisEnableConfig, ConfigBlock, ConfigDocument, ToolchainConfig};
use proptest::prelude::*;
use std::path::PathBuf;

fn path_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}(/[a-z0-9]{1,8}){0,3}"
}

fn flags_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("-[a-zA-Z][a-z0-9=]{0,10}", 0..4).prop_map(|flags| flags.join(" "))
}

// Strategy for generating blocks with arbitrary subsets of keys
fn block_strategy() -> impl Strategy<Value = ConfigBlock> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(path_strategy()),
        prop::option::of(path_strategy()),
        prop::option::of(flags_strategy()),
        prop::option::of(flags_strategy()),
    )
        .prop_map(
            |(enabled, primary_path, secondary_path, primary_flags, secondary_flags)| {
                ConfigBlock {
                    enabled,
                    primary_path,
                    secondary_path,
                    primary_flags,
                    secondary_flags,
                }
            },
        )
}

// A default block always carries both paths
fn default_block_strategy() -> impl Strategy<Value = ConfigBlock> {
    (block_strategy(), path_strategy(), path_strategy()).prop_map(|(mut block, a, b)| {
        block.primary_path = Some(a);
        block.secondary_path = Some(b);
        block
    })
}

fn expected_field<T: Clone>(later: &Option<T>, earlier: T) -> T {
    later.clone().unwrap_or(earlier)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A field set by the later block wins; an unset one keeps the earlier value
    #[test]
    fn merge_later_block_wins_field_by_field(
        first in block_strategy(),
        second in block_strategy(),
    ) {
        let mut after_first = ToolchainConfig::default();
        ConfigMerger::merge_into(&mut after_first, &first);

        let mut result = after_first.clone();
        ConfigMerger::merge_into(&mut result, &second);

        prop_assert_eq!(result.enabled, expected_field(&second.enabled, after_first.enabled));
        prop_assert_eq!(
            &result.primary_path,
            &expected_field(&second.primary_path, after_first.primary_path.clone())
        );
        prop_assert_eq!(
            &result.secondary_path,
            &expected_field(&second.secondary_path, after_first.secondary_path.clone())
        );
        prop_assert_eq!(
            &result.primary_flags,
            &expected_field(&second.primary_flags, after_first.primary_flags.clone())
        );
        prop_assert_eq!(
            &result.secondary_flags,
            &expected_field(&second.secondary_flags, after_first.secondary_flags.clone())
        );
    }

    // Merging an empty block is the identity
    #[test]
    fn merge_empty_block_is_identity(block in block_strategy()) {
        let mut config = ToolchainConfig::default();
        ConfigMerger::merge_into(&mut config, &block);
        let before = config.clone();
        ConfigMerger::merge_into(&mut config, &ConfigBlock::default());
        prop_assert_eq!(config, before);
    }

    // Merging the same block twice is the same as merging it once
    #[test]
    fn merge_is_idempotent(block in block_strategy()) {
        let mut once = ToolchainConfig::default();
        ConfigMerger::merge_into(&mut once, &block);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &block);
        prop_assert_eq!(once, twice);
    }

    // Full chain: defaults, default block, product block, SDCLANG
    #[test]
    fn resolution_applies_layers_in_order(
        default in default_block_strategy(),
        product in prop::option::of(block_strategy()),
        env_enabled in prop::option::of(any::<bool>()),
    ) {
        let mut document = ConfigDocument::with_default(default.clone());
        if let Some(ref block) = product {
            document = document.with_block("taro", block.clone());
        }
        let source = ConfigSource { path: PathBuf::from("sdclang.json"), document };

        let mut env = MapEnvironment::new().with(PRODUCT_VAR, "taro");
        if let Some(enabled) = env_enabled {
            env.set(ENABLED_VAR, enabled.to_string());
        }

        let product = product.unwrap_or_default();
        let result = ToolchainResolver::new(env)
            .resolve_documents(Some(&source), &AnalysisEnableConfig::default());

        let primary = expected_field(&product.primary_path, default.primary_path.clone().unwrap());
        let secondary =
            expected_field(&product.secondary_path, default.secondary_path.clone().unwrap());

        // The generated paths are never empty, so validation always passes.
        let resolution = result.unwrap();
        let config = &resolution.config;

        let enabled = env_enabled
            .or(product.enabled)
            .or(default.enabled)
            .unwrap_or(true);
        prop_assert_eq!(config.enabled, enabled);
        prop_assert_eq!(&config.primary_path, &primary);
        prop_assert_eq!(&config.secondary_path, &secondary);

        let defaults = ToolchainConfig::default();
        let flags = product
            .primary_flags
            .clone()
            .or(default.primary_flags.clone())
            .unwrap_or(defaults.primary_flags);
        prop_assert_eq!(&config.primary_flags, &flags);
    }
}
