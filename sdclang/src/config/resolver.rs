//! Precedence resolution of the toolchain configuration.
//!
//! Layers are applied in a fixed order, each overriding only what it sets:
//!
//! 1. Built-in defaults
//! 2. The `"default"` block of the device configuration (required, with both
//!    path keys, whenever the file loads)
//! 3. The block named by `TARGET_PRODUCT`, if any
//! 4. The early `SDCLANG` environment override
//!
//! Static-analysis augmentation runs between layers 3 and 4, but only when a
//! device configuration loaded. Validation gates the result.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::config::analysis::{AnalysisAugmenter, AnalysisStatus};
use crate::config::environment::{
    Environment, EnvironmentConfig, ProcessEnvironment, ENABLED_VAR, PRODUCT_VAR,
};
use crate::config::loader::{ConfigLoader, ConfigPaths, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::{AnalysisEnableConfig, ToolchainConfig};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// A layer that contributed to the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum ConfigOrigin {
    /// Built-in defaults.
    Defaults,
    /// The `"default"` block of a device configuration file.
    DefaultBlock {
        /// The file the block came from.
        path: PathBuf,
    },
    /// A product-specific block.
    ProductBlock {
        /// The product the block is keyed by.
        product: String,
    },
    /// An environment variable read at resolution time.
    Environment {
        /// The variable that was applied.
        variable: String,
    },
}

/// The outcome of resolving the toolchain configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The frozen configuration shared with the published variables.
    pub config: Arc<ToolchainConfig>,
    /// Flag string from the AE config file, empty if there was none.
    pub ae_flag: String,
    /// What the static-analysis step did.
    pub analysis: AnalysisStatus,
    /// The layers that contributed, lowest precedence first.
    pub origins: Vec<ConfigOrigin>,
}

/// Resolves the toolchain configuration from files and the environment.
///
/// # Examples
///
/// ```
/// use sdclang::config::{
///     AnalysisEnableConfig, ConfigBlock, ConfigDocument, ConfigSource, MapEnvironment,
///     ToolchainResolver,
/// };
///
/// let source = ConfigSource {
///     path: "sdclang.json".into(),
///     document: ConfigDocument::with_default(ConfigBlock {
///         primary_path: Some("/a".into()),
///         secondary_path: Some("/b".into()),
///         ..Default::default()
///     }),
/// };
///
/// let resolver = ToolchainResolver::new(MapEnvironment::new());
/// let resolution = resolver
///     .resolve_documents(Some(&source), &AnalysisEnableConfig::default())
///     .unwrap();
/// assert_eq!(resolution.config.primary_path, "/a");
/// assert_eq!(resolution.config.secondary_path, "/b");
/// assert!(resolution.config.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct ToolchainResolver<E> {
    env: E,
}

impl ToolchainResolver<ProcessEnvironment> {
    /// A resolver reading the real process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnvironment)
    }
}

impl<E: Environment> ToolchainResolver<E> {
    /// Create a resolver over `env`.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// The environment this resolver reads.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Resolve using the file locations named by the environment.
    ///
    /// # Errors
    ///
    /// Returns a fatal configuration error (see [`Error::is_fatal_configuration`])
    /// if the device configuration lacks its default block or a required
    /// path, or if a toolchain path is left empty.
    pub fn resolve(&self) -> Result<Resolution> {
        self.resolve_with_paths(&ConfigPaths::from_env(&self.env))
    }

    /// Resolve using explicit file locations.
    ///
    /// # Errors
    ///
    /// See [`ToolchainResolver::resolve`].
    pub fn resolve_with_paths(&self, paths: &ConfigPaths) -> Result<Resolution> {
        let ae_config = ConfigLoader::load_ae_config(paths.ae_config.as_deref());
        let source = ConfigLoader::load_device_config(paths.device_config.as_deref());
        self.resolve_documents(source.as_ref(), &ae_config)
    }

    /// Resolve from documents that are already loaded.
    ///
    /// `source` is `None` when no device configuration is present, in which
    /// case the file layers are skipped.
    ///
    /// # Errors
    ///
    /// See [`ToolchainResolver::resolve`].
    pub fn resolve_documents(
        &self,
        source: Option<&ConfigSource>,
        ae_config: &AnalysisEnableConfig,
    ) -> Result<Resolution> {
        let mut config = ToolchainConfig::default();
        let mut origins = vec![ConfigOrigin::Defaults];
        let mut analysis = AnalysisStatus::Skipped;

        if let Some(source) = source {
            let default = source
                .document
                .default_block()?
                .ok_or_else(|| Error::MissingDefaultBlock {
                    path: source.path.clone(),
                })?;
            ConfigMerger::merge_default(&mut config, &default)?;
            origins.push(ConfigOrigin::DefaultBlock {
                path: source.path.clone(),
            });

            if let Some(product) = self.env.var(PRODUCT_VAR) {
                if let Some(block) = source.document.product_block(&product)? {
                    ConfigMerger::merge_into(&mut config, &block);
                    log::debug!("applied product block '{product}'");
                    origins.push(ConfigOrigin::ProductBlock { product });
                }
            }

            analysis = AnalysisAugmenter::apply(&mut config, &self.env);
        }

        if EnvironmentConfig::apply_overrides(&mut config, &self.env) {
            origins.push(ConfigOrigin::Environment {
                variable: ENABLED_VAR.into(),
            });
        }

        ConfigValidator::validate(&config, &self.env)?;

        Ok(Resolution {
            config: Arc::new(config),
            ae_flag: ae_config.flag.clone(),
            analysis,
            origins,
        })
    }
}
