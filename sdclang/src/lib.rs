#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # sdclang
//!
//! Resolution of the Snapdragon LLVM (sdclang) toolchain configuration for a
//! product build.
//!
//! Four layers decide which compiler paths and flags are active: built-in
//! defaults, the `"default"` block of a JSON device configuration, the block
//! for the current product, and environment overrides. The result is
//! published as lazily evaluated build variables.
//!
//! ## Core Types
//!
//! - [`ToolchainConfig`]: the resolved configuration
//! - [`ToolchainResolver`]: runs the layered resolution
//! - [`VariableScope`]: named build variables
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//! - [`output::OutputFormat`]: formatting of evaluated variables
//!
//! ## Examples
//!
//! ```
//! use sdclang::config::{AnalysisEnableConfig, ConfigSource, MapEnvironment};
//! use sdclang::{global_scope, ToolchainResolver};
//!
//! let source = ConfigSource {
//!     path: "vendor/qcom/sdclang.json".into(),
//!     document: serde_json::from_str(r#"{
//!         "default": {"SDCLANG_PATH": "/a", "SDCLANG_PATH_2": "/b"},
//!         "lahaina": {"SDCLANG_PATH": "/c"}
//!     }"#).unwrap(),
//! };
//!
//! let env = MapEnvironment::new().with("TARGET_PRODUCT", "lahaina");
//! let resolution = ToolchainResolver::new(env.clone())
//!     .resolve_documents(Some(&source), &AnalysisEnableConfig::default())
//!     .unwrap();
//!
//! let scope = global_scope(&resolution).unwrap();
//! assert_eq!(scope.evaluate("SDClangBin", &env).unwrap(), "/c");
//! assert_eq!(scope.evaluate("SDClangBin2", &env).unwrap(), "/b");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod variables;

// Re-export key types at crate root for convenience
pub use config::{Resolution, ToolchainConfig, ToolchainResolver};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use variables::{global_scope, VariableScope};
