//! Environment variable handling for configuration overrides.
//!
//! Resolution never calls `std::env` directly. Everything goes through the
//! [`Environment`] capability so that the early override (read once while
//! resolving) and the late overrides (read at every variable evaluation) can
//! be exercised without mutating the process environment.

use std::collections::HashMap;
use std::env;

use crate::config::schema::ToolchainConfig;
use crate::error::{Error, Result};

/// Selects the product-specific block of the device configuration.
pub const PRODUCT_VAR: &str = "TARGET_PRODUCT";
/// Root that configuration file paths are joined beneath.
pub const BUILD_ROOT_VAR: &str = "ANDROID_BUILD_TOP";
/// Path of the AE flag file, relative to the build root.
pub const AE_CONFIG_VAR: &str = "SDCLANG_AE_CONFIG";
/// Path of the device configuration file, relative to the build root.
pub const DEVICE_CONFIG_VAR: &str = "SDCLANG_CONFIG";
/// Enables the static-analysis flags.
pub const ANALYSIS_ENABLED_VAR: &str = "SDCLANG_SA_ENABLED";
/// Directory the static-analysis output directory is created beneath.
pub const ANALYSIS_BASE_VAR: &str = "ANDROID_BUILD_TOP";
/// Early boolean override for whether the toolchain is enabled.
pub const ENABLED_VAR: &str = "SDCLANG";
/// Late override for the primary toolchain path.
pub const PRIMARY_PATH_VAR: &str = "SDCLANG_PATH";
/// Late override for the secondary toolchain path.
pub const SECONDARY_PATH_VAR: &str = "SDCLANG_PATH_2";
/// Late override for the primary flag string.
pub const PRIMARY_FLAGS_VAR: &str = "SDCLANG_COMMON_FLAGS";
/// Late override for the secondary flag string.
pub const SECONDARY_FLAGS_VAR: &str = "SDCLANG_COMMON_FLAGS_2";
/// Verbosity of the stderr logger.
pub const LOG_MODE_VAR: &str = "SDCLANG_LOG_MODE";

/// Read access to environment variables.
///
/// A variable that is set to the empty string is reported as unset, which
/// is how every consumer in this crate treats it.
///
/// # Examples
///
/// ```
/// use sdclang::config::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::new()
///     .with("TARGET_PRODUCT", "lahaina")
///     .with("SDCLANG_PATH", "");
/// assert_eq!(env.var("TARGET_PRODUCT").as_deref(), Some("lahaina"));
/// assert_eq!(env.var("SDCLANG_PATH"), None);
/// ```
pub trait Environment {
    /// Look up a raw variable, including empty values.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Look up a variable, treating an empty value as unset.
    fn var(&self, name: &str) -> Option<String> {
        self.lookup(name).filter(|value| !value.is_empty())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// An environment backed by an in-memory map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// An environment whose explicit overrides shadow a base environment.
///
/// Front ends use this to let command-line options take the place of the
/// variables they stand for.
#[derive(Debug, Clone, Default)]
pub struct OverlayEnvironment<E> {
    base: E,
    overrides: MapEnvironment,
}

impl<E: Environment> OverlayEnvironment<E> {
    /// Wrap `base` with no overrides.
    pub fn new(base: E) -> Self {
        Self {
            base,
            overrides: MapEnvironment::new(),
        }
    }

    /// Shadow `name` with `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.set(name, value);
        self
    }

    /// Shadow `name` only when `value` is `Some`.
    #[must_use]
    pub fn with_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }
}

impl<E: Environment> Environment for OverlayEnvironment<E> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.overrides
            .lookup(name)
            .or_else(|| self.base.lookup(name))
    }
}

/// Applies the environment overrides that are bound at resolution time.
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply the early `SDCLANG` override to `config`.
    ///
    /// Returns whether the override was applied. A malformed value is not an
    /// error: the environment is untrusted input, so `enabled` is left as the
    /// configuration files set it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::config::{EnvironmentConfig, MapEnvironment, ToolchainConfig};
    ///
    /// let mut config = ToolchainConfig::default();
    /// let env = MapEnvironment::new().with("SDCLANG", "false");
    /// assert!(EnvironmentConfig::apply_overrides(&mut config, &env));
    /// assert!(!config.enabled);
    ///
    /// let env = MapEnvironment::new().with("SDCLANG", "maybe");
    /// assert!(!EnvironmentConfig::apply_overrides(&mut config, &env));
    /// assert!(!config.enabled);
    /// ```
    pub fn apply_overrides(config: &mut ToolchainConfig, env: &dyn Environment) -> bool {
        let Some(raw) = env.var(ENABLED_VAR) else {
            return false;
        };

        match Self::parse_bool(ENABLED_VAR, &raw) {
            Ok(enabled) => {
                config.enabled = enabled;
                true
            }
            Err(e) => {
                log::debug!("ignoring {ENABLED_VAR} override: {e}");
                false
            }
        }
    }

    /// Whether an environment flag is set to a true value.
    ///
    /// Unset and malformed values both count as false.
    pub fn flag(env: &dyn Environment, name: &str) -> bool {
        env.var(name)
            .and_then(|raw| Self::parse_bool(name, &raw).ok())
            .unwrap_or(false)
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts `1 t T TRUE true True` for true and `0 f F FALSE false False`
    /// for false. Mixed spellings such as `tRUE` are rejected.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `field` for any other input.
    pub fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid boolean value: '{s}' (expected true/false/1/0/t/f)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_true_variants() {
        for value in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(EnvironmentConfig::parse_bool("test", value).unwrap(), "{value}");
        }
    }

    #[test]
    fn test_parse_bool_false_variants() {
        for value in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!EnvironmentConfig::parse_bool("test", value).unwrap(), "{value}");
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        for value in ["", "yes", "on", "tRUE", " true", "2"] {
            assert!(EnvironmentConfig::parse_bool("test", value).is_err(), "{value:?}");
        }
    }

    #[test]
    fn test_empty_value_reads_as_unset() {
        let env = MapEnvironment::new().with("SDCLANG_PATH", "");
        assert_eq!(env.lookup("SDCLANG_PATH").as_deref(), Some(""));
        assert_eq!(env.var("SDCLANG_PATH"), None);
    }

    #[test]
    fn test_map_environment_set_and_remove() {
        let mut env = MapEnvironment::new();
        env.set("TARGET_PRODUCT", "kona");
        assert_eq!(env.var("TARGET_PRODUCT").as_deref(), Some("kona"));
        assert_eq!(env.remove("TARGET_PRODUCT").as_deref(), Some("kona"));
        assert_eq!(env.var("TARGET_PRODUCT"), None);
    }

    #[test]
    fn test_map_environment_from_iter() {
        let env: MapEnvironment = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.var("B").as_deref(), Some("2"));
    }

    #[test]
    fn test_overlay_shadows_base() {
        let base = MapEnvironment::new()
            .with("TARGET_PRODUCT", "kona")
            .with("ANDROID_BUILD_TOP", "/src");
        let env = OverlayEnvironment::new(base)
            .with("TARGET_PRODUCT", "lahaina")
            .with_opt("SDCLANG_CONFIG", None::<String>);
        assert_eq!(env.var("TARGET_PRODUCT").as_deref(), Some("lahaina"));
        assert_eq!(env.var("ANDROID_BUILD_TOP").as_deref(), Some("/src"));
        assert_eq!(env.var("SDCLANG_CONFIG"), None);
    }

    #[test]
    fn test_overlay_empty_override_hides_base() {
        let base = MapEnvironment::new().with("SDCLANG_PATH", "/env");
        let env = OverlayEnvironment::new(base).with("SDCLANG_PATH", "");
        assert_eq!(env.var("SDCLANG_PATH"), None);
    }

    #[test]
    fn test_apply_overrides_no_env_vars() {
        let mut config = ToolchainConfig::default();
        assert!(!EnvironmentConfig::apply_overrides(&mut config, &MapEnvironment::new()));
        assert!(config.enabled);
    }

    #[test]
    fn test_apply_overrides_empty_value_is_no_override() {
        let mut config = ToolchainConfig {
            enabled: false,
            ..Default::default()
        };
        let env = MapEnvironment::new().with(ENABLED_VAR, "");
        assert!(!EnvironmentConfig::apply_overrides(&mut config, &env));
        assert!(!config.enabled);
    }

    #[test]
    fn test_apply_overrides_malformed_keeps_value() {
        let mut config = ToolchainConfig::default();
        let env = MapEnvironment::new().with(ENABLED_VAR, "nope");
        assert!(!EnvironmentConfig::apply_overrides(&mut config, &env));
        assert!(config.enabled);
    }

    #[test]
    fn test_flag() {
        let env = MapEnvironment::new()
            .with("ON", "T")
            .with("OFF", "0")
            .with("BAD", "yes");
        assert!(EnvironmentConfig::flag(&env, "ON"));
        assert!(!EnvironmentConfig::flag(&env, "OFF"));
        assert!(!EnvironmentConfig::flag(&env, "BAD"));
        assert!(!EnvironmentConfig::flag(&env, "MISSING"));
    }
}
