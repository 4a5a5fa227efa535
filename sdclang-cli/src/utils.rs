//! Utility functions for CLI operations.
//!
//! This module provides the pieces every command shares: the environment the
//! command-line options are layered onto, configuration file discovery, and
//! toolchain resolution.

use crate::error::CliError;
use sdclang::config::environment::{BUILD_ROOT_VAR, PRODUCT_VAR};
use sdclang::config::{ConfigPaths, OverlayEnvironment, ProcessEnvironment, ToolchainResolver};
use sdclang::{global_scope, Resolution, VariableScope};
use std::path::{Path, PathBuf};

/// The environment commands resolve and evaluate against.
pub type CliEnvironment = OverlayEnvironment<ProcessEnvironment>;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Root of the source tree.
    pub build_root: Option<PathBuf>,

    /// Product whose block applies.
    pub product: Option<String>,

    /// Explicit device configuration file.
    pub config: Option<PathBuf>,

    /// Explicit AE flag file.
    pub ae_config: Option<PathBuf>,
}

impl GlobalOptions {
    /// The process environment with the build root and product options
    /// standing in for the variables they replace.
    pub fn environment(&self) -> CliEnvironment {
        OverlayEnvironment::new(ProcessEnvironment)
            .with_opt(
                BUILD_ROOT_VAR,
                self.build_root
                    .as_ref()
                    .map(|root| root.to_string_lossy().into_owned()),
            )
            .with_opt(PRODUCT_VAR, self.product.clone())
    }

    /// Configuration file locations.
    ///
    /// Explicit `--config` and `--ae-config` paths are used as given;
    /// otherwise the locations come from the environment, relative to the
    /// build root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` if an explicitly named file does not exist.
    pub fn config_paths(&self, env: &CliEnvironment) -> Result<ConfigPaths, CliError> {
        let mut paths = ConfigPaths::from_env(env);
        if let Some(config) = &self.config {
            paths.device_config = Some(require_file(config)?);
        }
        if let Some(ae_config) = &self.ae_config {
            paths.ae_config = Some(require_file(ae_config)?);
        }
        Ok(paths)
    }

    /// Resolve the toolchain configuration.
    ///
    /// Returns the environment alongside the resolution so callers evaluate
    /// variables against the same view the resolution saw.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if resolution fails.
    pub fn resolve(&self) -> Result<(CliEnvironment, Resolution), CliError> {
        let env = self.environment();
        let paths = self.config_paths(&env)?;
        describe_paths(&paths);
        let resolution = ToolchainResolver::new(&env).resolve_with_paths(&paths)?;
        Ok((env, resolution))
    }

    /// Resolve and publish the build variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if resolution fails.
    pub fn scope(&self) -> Result<(CliEnvironment, VariableScope), CliError> {
        let (env, resolution) = self.resolve()?;
        let scope = global_scope(&resolution)?;
        Ok((env, scope))
    }
}

/// Check that an explicitly named file exists.
pub fn require_file(path: &Path) -> Result<PathBuf, CliError> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )))
    }
}

fn describe_paths(paths: &ConfigPaths) {
    let describe = |path: &Option<PathBuf>| {
        path.as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    };
    log::debug!("device config: {}", describe(&paths.device_config));
    log::debug!("AE config: {}", describe(&paths.ae_config));
}
