//! Configuration schema definitions.
//!
//! This module defines the on-disk JSON documents (the device configuration
//! and the AE flag file) and the resolved [`ToolchainConfig`] they feed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Name of the mandatory baseline block in the device configuration.
pub const DEFAULT_BLOCK: &str = "default";

/// Built-in primary toolchain path.
pub const DEFAULT_PRIMARY_PATH: &str = "prebuilts/clang/host/linux-x86/sdclang-4.0.14/bin";

/// Built-in primary flag string.
pub const DEFAULT_PRIMARY_FLAGS: &str = "-O3 -fvectorize -mllvm -polly-run-dce";

/// The resolved toolchain configuration.
///
/// Built from [`Default`] (the hard-coded layer), mutated by each precedence
/// layer in turn, then frozen and shared with the lazily evaluated build
/// variables.
///
/// # Examples
///
/// ```
/// use sdclang::config::ToolchainConfig;
///
/// let config = ToolchainConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.primary_path, "prebuilts/clang/host/linux-x86/sdclang-4.0.14/bin");
/// assert!(config.secondary_path.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Whether the alternate toolchain is active.
    pub enabled: bool,

    /// Directory holding the primary toolchain binaries.
    pub primary_path: String,

    /// Directory holding the secondary toolchain binaries.
    pub secondary_path: String,

    /// Flags passed to the primary toolchain.
    pub primary_flags: String,

    /// Flags passed to the secondary toolchain.
    pub secondary_flags: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            primary_path: DEFAULT_PRIMARY_PATH.to_string(),
            secondary_path: String::new(),
            primary_flags: DEFAULT_PRIMARY_FLAGS.to_string(),
            secondary_flags: String::new(),
        }
    }
}

/// One block of the device configuration document.
///
/// Every key is optional at the type level so that "not present" can be told
/// apart from "present and empty". The default block additionally requires
/// both path keys; that rule is enforced while merging.
///
/// # Examples
///
/// ```
/// use sdclang::config::ConfigBlock;
///
/// let block: ConfigBlock = serde_json::from_str(r#"{"SDCLANG_PATH": "/c"}"#).unwrap();
/// assert_eq!(block.primary_path.as_deref(), Some("/c"));
/// assert_eq!(block.enabled, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigBlock {
    /// `SDCLANG`: whether the toolchain is enabled.
    #[serde(rename = "SDCLANG", default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `SDCLANG_PATH`: primary toolchain path.
    #[serde(rename = "SDCLANG_PATH", default, skip_serializing_if = "Option::is_none")]
    pub primary_path: Option<String>,

    /// `SDCLANG_PATH_2`: secondary toolchain path.
    #[serde(rename = "SDCLANG_PATH_2", default, skip_serializing_if = "Option::is_none")]
    pub secondary_path: Option<String>,

    /// `SDCLANG_FLAGS`: primary flag string.
    #[serde(rename = "SDCLANG_FLAGS", default, skip_serializing_if = "Option::is_none")]
    pub primary_flags: Option<String>,

    /// `SDCLANG_FLAGS_2`: secondary flag string.
    #[serde(rename = "SDCLANG_FLAGS_2", default, skip_serializing_if = "Option::is_none")]
    pub secondary_flags: Option<String>,
}

/// The device configuration document: block name to raw block.
///
/// Only the top level is decoded up front. A block is decoded when it is
/// asked for, so entries that are never read (comments, blocks for other
/// products) may hold anything.
///
/// # Examples
///
/// ```
/// use sdclang::config::ConfigDocument;
///
/// let doc: ConfigDocument = serde_json::from_str(r#"{
///     "_comment": ["any", "shape"],
///     "default": {"SDCLANG_PATH": "/a", "SDCLANG_PATH_2": "/b"},
///     "lahaina": {"SDCLANG": false}
/// }"#).unwrap();
/// assert!(doc.default_block().unwrap().is_some());
/// assert_eq!(doc.product_block("lahaina").unwrap().unwrap().enabled, Some(false));
/// assert!(doc.product_block("kona").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    blocks: HashMap<String, Value>,
}

impl ConfigDocument {
    /// Create a document with only a default block.
    #[must_use]
    pub fn with_default(block: ConfigBlock) -> Self {
        Self::default().with_block(DEFAULT_BLOCK, block)
    }

    /// Builder-style insertion of a named block.
    #[must_use]
    pub fn with_block(mut self, name: impl Into<String>, block: ConfigBlock) -> Self {
        // A block of strings and bools always serializes.
        let value = serde_json::to_value(block).unwrap_or_default();
        self.blocks.insert(name.into(), value);
        self
    }

    /// The `"default"` block, if present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBlock` if the entry is not a block.
    pub fn default_block(&self) -> Result<Option<ConfigBlock>> {
        self.block(DEFAULT_BLOCK)
    }

    /// The block for `product`, if present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBlock` if the entry is not a block.
    pub fn product_block(&self, product: &str) -> Result<Option<ConfigBlock>> {
        self.block(product)
    }

    fn block(&self, name: &str) -> Result<Option<ConfigBlock>> {
        self.blocks
            .get(name)
            .map(|value| {
                ConfigBlock::deserialize(value).map_err(|e| Error::InvalidBlock {
                    block: name.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Names of the product blocks, sorted.
    ///
    /// Every object-valued entry except `"default"` counts, whether or not
    /// its keys decode.
    #[must_use]
    pub fn products(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .blocks
            .iter()
            .filter(|(name, value)| name.as_str() != DEFAULT_BLOCK && value.is_object())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// The AE ("auto-enable") flag file.
///
/// # Examples
///
/// ```
/// use sdclang::config::AnalysisEnableConfig;
///
/// let ae: AnalysisEnableConfig = serde_json::from_str(r#"{"SDCLANG_AE_FLAG": "-fae"}"#).unwrap();
/// assert_eq!(ae.flag, "-fae");
///
/// let empty: AnalysisEnableConfig = serde_json::from_str("{}").unwrap();
/// assert!(empty.flag.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEnableConfig {
    /// `SDCLANG_AE_FLAG`: prepended to both flag variables.
    #[serde(rename = "SDCLANG_AE_FLAG", default)]
    pub flag: String,
}
