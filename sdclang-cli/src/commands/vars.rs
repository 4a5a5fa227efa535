//! Vars command implementation.
//!
//! Evaluates every published build variable against the current environment
//! and prints the results in the requested format.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use sdclang::output::{OutputFormat, ShellType};

/// Evaluate every published build variable.
#[derive(Args)]
pub struct VarsCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "human",
        env = "SDCLANG_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: VarsFormat,

    /// Shell for the export format (detected when omitted)
    #[arg(long, value_name = "SHELL")]
    pub shell: Option<String>,

    /// Expand ${Name} references in values
    #[arg(long)]
    pub expand: bool,

    /// Only show variables whose name starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Output format for the vars command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum VarsFormat {
    /// Aligned `name = value` lines
    Human,
    /// JSON object
    Json,
    /// YAML mapping
    Yaml,
    /// Dotenv (.env file) lines
    Dotenv,
    /// Shell export statements
    Export,
}

impl VarsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (env, scope) = global.scope()?;

        let format = match self.format {
            VarsFormat::Human => OutputFormat::Human,
            VarsFormat::Json => OutputFormat::Json,
            VarsFormat::Yaml => OutputFormat::Yaml,
            VarsFormat::Dotenv => OutputFormat::Dotenv,
            VarsFormat::Export => {
                let shell = match &self.shell {
                    Some(name) => ShellType::from_string(name)
                        .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
                    None => ShellType::detect(&env),
                };
                OutputFormat::Export(shell)
            }
        };

        let mut variables = scope.evaluate_all(&env, self.expand)?;
        if let Some(prefix) = &self.prefix {
            variables.retain(|(name, _)| name.starts_with(prefix.as_str()));
        }

        let output = format.create_formatter().format(&variables)?;
        println!("{output}");
        Ok(())
    }
}
