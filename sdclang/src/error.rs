//! Error types for the sdclang library.
//!
//! This module provides the error hierarchy for toolchain configuration
//! resolution and build-variable evaluation, using `thiserror` for ergonomic
//! error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an sdclang error.
///
/// # Examples
///
/// ```
/// use sdclang::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("prebuilts/clang/host/linux-x86/sdclang-4.0.14/bin".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the sdclang library.
///
/// The first four variants are fatal configuration errors: a build must not
/// proceed with an undefined toolchain. Everything else is raised by strict
/// loading or by the build-variable scope.
#[derive(Debug, Error)]
pub enum Error {
    /// The device configuration document has no `"default"` block.
    #[error("default block is required in the SD Clang config file {}", path.display())]
    MissingDefaultBlock {
        /// The configuration file that was loaded.
        path: PathBuf,
    },

    /// A field that is required in a configuration block was not present.
    #[error("{field} is required in the {block} block")]
    MissingRequiredField {
        /// The block that is missing the field.
        block: String,
        /// The missing field.
        field: String,
    },

    /// The default or active product block could not be decoded.
    #[error("{block} block is invalid: {message}")]
    InvalidBlock {
        /// The block that failed to decode.
        block: String,
        /// What was wrong with it.
        message: String,
    },

    /// A required toolchain path resolved to an empty string and no
    /// environment override is present.
    #[error("{field} can not be empty")]
    EmptyPath {
        /// The name of the path setting (and its environment override).
        field: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A JSON document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A build variable was referenced that has not been registered.
    #[error("unknown build variable: {name}")]
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },

    /// A build variable was registered twice.
    #[error("build variable already defined: {name}")]
    DuplicateVariable {
        /// The name that was registered twice.
        name: String,
    },

    /// Expanding a build variable led back to itself.
    #[error("build variable reference cycle: {}", chain.join(" -> "))]
    VariableCycle {
        /// The chain of references, ending with the repeated name.
        chain: Vec<String>,
    },
}

impl Error {
    /// Check if error is one of the fatal configuration errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::Error;
    ///
    /// let err = Error::EmptyPath { field: "SDCLANG_PATH".into() };
    /// assert!(err.is_fatal_configuration());
    ///
    /// let err = Error::UnknownVariable { name: "ClangBin".into() };
    /// assert!(!err.is_fatal_configuration());
    /// ```
    #[must_use]
    pub fn is_fatal_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingDefaultBlock { .. }
                | Self::MissingRequiredField { .. }
                | Self::InvalidBlock { .. }
                | Self::EmptyPath { .. }
        )
    }
}
