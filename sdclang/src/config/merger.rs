//! Configuration merging and precedence handling.
//!
//! Each block of the device configuration is laid over the configuration
//! built so far. A key only overrides when it is present in the block; an
//! absent key never clears an earlier value.

use crate::config::schema::{ConfigBlock, ToolchainConfig, DEFAULT_BLOCK};
use crate::error::{Error, Result};

/// Merges configuration blocks according to precedence rules.
///
/// # Examples
///
/// ```
/// use sdclang::config::{ConfigBlock, ConfigMerger, ToolchainConfig};
///
/// let mut config = ToolchainConfig::default();
/// let product = ConfigBlock { primary_path: Some("/c".to_string()), ..Default::default() };
/// ConfigMerger::merge_into(&mut config, &product);
/// assert_eq!(config.primary_path, "/c");
/// assert!(config.enabled);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge the default block, which must carry both path keys.
    ///
    /// Nothing is merged when a required key is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredField`] naming `SDCLANG_PATH` or
    /// `SDCLANG_PATH_2`.
    pub fn merge_default(target: &mut ToolchainConfig, block: &ConfigBlock) -> Result<()> {
        Self::require(block.primary_path.is_some(), "SDCLANG_PATH")?;
        Self::require(block.secondary_path.is_some(), "SDCLANG_PATH_2")?;
        Self::merge_into(target, block);
        Ok(())
    }

    /// Merge a block with every key optional.
    pub fn merge_into(target: &mut ToolchainConfig, source: &ConfigBlock) {
        if let Some(enabled) = source.enabled {
            target.enabled = enabled;
        }

        if let Some(ref path) = source.primary_path {
            target.primary_path.clone_from(path);
        }

        if let Some(ref path) = source.secondary_path {
            target.secondary_path.clone_from(path);
        }

        if let Some(ref flags) = source.primary_flags {
            target.primary_flags.clone_from(flags);
        }

        if let Some(ref flags) = source.secondary_flags {
            target.secondary_flags.clone_from(flags);
        }
    }

    fn require(present: bool, field: &str) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(Error::MissingRequiredField {
                block: DEFAULT_BLOCK.into(),
                field: field.into(),
            })
        }
    }
}
