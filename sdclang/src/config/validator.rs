//! Configuration validation.
//!
//! The one hard invariant of resolution: a build never proceeds with an
//! undefined toolchain path.

use crate::config::environment::{Environment, PRIMARY_PATH_VAR, SECONDARY_PATH_VAR};
use crate::config::merger::ConfigMerger;
use crate::config::schema::{ConfigDocument, ToolchainConfig, DEFAULT_BLOCK};
use crate::error::{Error, Result};

/// Validates resolved configuration and device configuration documents.
///
/// # Examples
///
/// ```
/// use sdclang::config::{ConfigValidator, MapEnvironment, ToolchainConfig};
///
/// let config = ToolchainConfig { secondary_path: String::new(), ..Default::default() };
/// assert!(ConfigValidator::validate(&config, &MapEnvironment::new()).is_err());
///
/// let env = MapEnvironment::new().with("SDCLANG_PATH_2", "/opt/sdclang2/bin");
/// ConfigValidator::validate(&config, &env).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check that each toolchain path is either resolved or overridden.
    ///
    /// The override is the same late-binding variable the published path
    /// variable reads, checked here once so that a missing path fails the
    /// configuration phase rather than a later build step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] naming `SDCLANG_PATH` or `SDCLANG_PATH_2`.
    pub fn validate(config: &ToolchainConfig, env: &dyn Environment) -> Result<()> {
        Self::validate_path(&config.primary_path, PRIMARY_PATH_VAR, env)?;
        Self::validate_path(&config.secondary_path, SECONDARY_PATH_VAR, env)?;
        Ok(())
    }

    /// Check the structural rules of a device configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the default block is missing or malformed, or if
    /// one of its path keys is missing.
    pub fn validate_document(document: &ConfigDocument) -> Result<()> {
        let default = document.default_block()?.ok_or_else(|| Error::Validation {
            field: DEFAULT_BLOCK.into(),
            message: "Default block is required".into(),
        })?;

        ConfigMerger::merge_default(&mut ToolchainConfig::default(), &default)
    }

    fn validate_path(value: &str, field: &str, env: &dyn Environment) -> Result<()> {
        if value.is_empty() && env.var(field).is_none() {
            return Err(Error::EmptyPath {
                field: field.into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::MapEnvironment;
    use crate::config::schema::ConfigBlock;

    fn resolved(primary: &str, secondary: &str) -> ToolchainConfig {
        ToolchainConfig {
            primary_path: primary.into(),
            secondary_path: secondary.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_both_paths_set() {
        ConfigValidator::validate(&resolved("/a", "/b"), &MapEnvironment::new()).unwrap();
    }

    #[test]
    fn test_validate_empty_primary() {
        let err = ConfigValidator::validate(&resolved("", "/b"), &MapEnvironment::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPath { ref field } if field == "SDCLANG_PATH"));
    }

    #[test]
    fn test_validate_empty_secondary() {
        let err = ConfigValidator::validate(&resolved("/a", ""), &MapEnvironment::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "SDCLANG_PATH_2 can not be empty");
    }

    #[test]
    fn test_validate_override_satisfies_each_path_independently() {
        let env = MapEnvironment::new().with(PRIMARY_PATH_VAR, "/env");
        ConfigValidator::validate(&resolved("", "/b"), &env).unwrap();
        // The primary override does nothing for the secondary path.
        assert!(ConfigValidator::validate(&resolved("", ""), &env).is_err());
    }

    #[test]
    fn test_validate_empty_override_does_not_count() {
        let env = MapEnvironment::new().with(SECONDARY_PATH_VAR, "");
        assert!(ConfigValidator::validate(&resolved("/a", ""), &env).is_err());
    }

    #[test]
    fn test_validate_document_ok() {
        let doc = ConfigDocument::with_default(ConfigBlock {
            primary_path: Some("/a".into()),
            secondary_path: Some("/b".into()),
            ..Default::default()
        })
        .with_block(
            "kona",
            ConfigBlock {
                enabled: Some(false),
                ..Default::default()
            },
        );
        ConfigValidator::validate_document(&doc).unwrap();
    }

    #[test]
    fn test_validate_document_missing_default() {
        let err = ConfigValidator::validate_document(&ConfigDocument::default()).unwrap_err();
        assert!(err.to_string().contains("Default block is required"));
    }

    #[test]
    fn test_validate_document_missing_path() {
        let doc = ConfigDocument::with_default(ConfigBlock {
            primary_path: Some("/a".into()),
            ..Default::default()
        });
        let err = ConfigValidator::validate_document(&doc).unwrap_err();
        assert!(err.to_string().contains("SDCLANG_PATH_2"));
    }

    #[test]
    fn test_validate_document_malformed_default() {
        let doc: ConfigDocument =
            serde_json::from_str(r#"{"default": {"SDCLANG": "yes"}}"#).unwrap();
        let err = ConfigValidator::validate_document(&doc).unwrap_err();
        assert!(err.to_string().starts_with("default block is invalid"));
    }
}
