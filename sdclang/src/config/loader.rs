//! Configuration file discovery and loading.
//!
//! Both configuration files are optional. Resolution loads them best-effort:
//! a file that is missing, unreadable or not valid JSON is treated exactly as
//! if its path had never been configured. The strict loader is only used for
//! explicit validation.

use crate::config::environment::{Environment, AE_CONFIG_VAR, BUILD_ROOT_VAR, DEVICE_CONFIG_VAR};
use crate::config::schema::{AnalysisEnableConfig, ConfigDocument};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the two optional configuration files.
///
/// # Examples
///
/// ```
/// use sdclang::config::{ConfigPaths, MapEnvironment};
/// use std::path::Path;
///
/// let env = MapEnvironment::new()
///     .with("ANDROID_BUILD_TOP", "/src")
///     .with("SDCLANG_CONFIG", "vendor/qcom/sdclang.json");
/// let paths = ConfigPaths::from_env(&env);
/// assert_eq!(paths.device_config.as_deref(), Some(Path::new("/src/vendor/qcom/sdclang.json")));
/// assert_eq!(paths.ae_config, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    /// The AE flag file.
    pub ae_config: Option<PathBuf>,
    /// The device configuration file.
    pub device_config: Option<PathBuf>,
}

impl ConfigPaths {
    /// Derive both paths from the build root and the per-file variables.
    pub fn from_env(env: &dyn Environment) -> Self {
        let root = env.var(BUILD_ROOT_VAR);
        let join = |var: &str| {
            env.var(var)
                .map(|relative| join_build_root(root.as_deref(), &relative))
        };

        Self {
            ae_config: join(AE_CONFIG_VAR),
            device_config: join(DEVICE_CONFIG_VAR),
        }
    }
}

/// Join `relative` beneath the build root.
///
/// A leading `/` on `relative` does not escape the root. Without a root the
/// path is used as given.
#[must_use]
pub fn join_build_root(root: Option<&str>, relative: &str) -> PathBuf {
    match root {
        Some(root) => Path::new(root).join(relative.trim_start_matches('/')),
        None => PathBuf::from(relative),
    }
}

/// A device configuration document together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed document.
    pub document: ConfigDocument,
}

/// Loads the configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the AE flag file, falling back to an empty flag.
    pub fn load_ae_config(path: Option<&Path>) -> AnalysisEnableConfig {
        path.and_then(|path| Self::load_optional(path, "AE config"))
            .unwrap_or_default()
    }

    /// Load the device configuration, if it is present and well formed.
    pub fn load_device_config(path: Option<&Path>) -> Option<ConfigSource> {
        let path = path?;
        let document = Self::load_optional(path, "device config")?;
        Some(ConfigSource {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Load and parse a device configuration, reporting every failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid device
    /// configuration document.
    pub fn load_document_strict(path: &Path) -> Result<ConfigSource> {
        let document = Self::load_file(path)?;
        Ok(ConfigSource {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Load and parse a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is invalid.
    pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        serde_json::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid JSON: {e}"),
        })
    }

    fn load_optional<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
        match Self::load_file(path) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("skipping {what}: {e}");
                None
            }
        }
    }
}
