//! Output formatting for evaluated build variables.
//!
//! Variables are formatted as shell-specific export statements, JSON, YAML,
//! dotenv, or human-readable text. Input order is preserved.

mod formatters;
mod shell;

use crate::Result;

pub use formatters::{
    DotenvFormatter, ExportFormatter, HumanFormatter, JsonFormatter, YamlFormatter,
};
pub use shell::ShellType;

/// Trait for formatting evaluated variables into different output formats.
pub trait OutputFormatter {
    /// Format `(name, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a name can't be expressed in the target format
    /// or serialization fails.
    fn format(&self, variables: &[(String, String)]) -> Result<String>;
}

/// Available output formats for evaluated variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Shell-specific export statements.
    Export(ShellType),
    /// JSON object.
    Json,
    /// YAML mapping.
    Yaml,
    /// Dotenv (.env file) format.
    Dotenv,
    /// Human-readable format.
    Human,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::output::{OutputFormat, ShellType};
    ///
    /// let vars = vec![("SDClangBin".to_string(), "/opt/sdclang/bin".to_string())];
    /// let out = OutputFormat::Export(ShellType::Bash)
    ///     .create_formatter()
    ///     .format(&vars)
    ///     .unwrap();
    /// assert_eq!(out, "export SDClangBin='/opt/sdclang/bin'");
    /// ```
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Export(shell) => Box::new(ExportFormatter::new(*shell)),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Dotenv => Box::new(DotenvFormatter),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}
