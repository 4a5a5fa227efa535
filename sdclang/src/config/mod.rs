//! Toolchain configuration for sdclang builds.
//!
//! This module resolves which compiler paths and flags are active for a
//! product build. The result is a [`ToolchainConfig`] that the build-variable
//! layer publishes under well-known names.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. `SDCLANG` environment variable (the enabled flag only)
//! 2. The product block named by `TARGET_PRODUCT`
//! 3. The `"default"` block of the device configuration (`SDCLANG_CONFIG`)
//! 4. Built-in defaults
//!
//! The path and flag variables have a second, later override point: the
//! `SDCLANG_PATH`, `SDCLANG_PATH_2`, `SDCLANG_COMMON_FLAGS` and
//! `SDCLANG_COMMON_FLAGS_2` variables are consulted every time a published
//! variable is evaluated, not here.
//!
//! # Examples
//!
//! Resolving from the process environment:
//!
//! ```no_run
//! use sdclang::config::ToolchainResolver;
//!
//! let resolution = ToolchainResolver::from_process_env().resolve().unwrap();
//! println!("primary toolchain: {}", resolution.config.primary_path);
//! ```
//!
//! Resolving against an explicit environment:
//!
//! ```
//! use sdclang::config::{MapEnvironment, ToolchainResolver};
//!
//! let env = MapEnvironment::new().with("SDCLANG_PATH_2", "/opt/sdclang2/bin");
//! let resolution = ToolchainResolver::new(env).resolve().unwrap();
//! assert_eq!(
//!     resolution.config.primary_path,
//!     "prebuilts/clang/host/linux-x86/sdclang-4.0.14/bin"
//! );
//! ```

pub mod analysis;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod resolver;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use analysis::{AnalysisAugmenter, AnalysisStatus};
pub use environment::{
    Environment, EnvironmentConfig, MapEnvironment, OverlayEnvironment, ProcessEnvironment,
};
pub use loader::{ConfigLoader, ConfigPaths, ConfigSource};
pub use merger::ConfigMerger;
pub use resolver::{ConfigOrigin, Resolution, ToolchainResolver};
pub use schema::{AnalysisEnableConfig, ConfigBlock, ConfigDocument, ToolchainConfig};
pub use validator::ConfigValidator;
