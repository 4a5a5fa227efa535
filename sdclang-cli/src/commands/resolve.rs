//! Resolve command implementation.
//!
//! Prints the resolved toolchain configuration together with the layers that
//! produced it.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use sdclang::config::ConfigOrigin;
use sdclang::Resolution;

/// Print the resolved toolchain configuration.
#[derive(Args)]
pub struct ResolveCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "human", ignore_case = true)]
    pub format: ResolveFormat,
}

/// Output format for the resolve command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ResolveFormat {
    /// Aligned human-readable summary
    Human,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_env, resolution) = global.resolve()?;

        let output = match self.format {
            ResolveFormat::Human => format_human(&resolution),
            ResolveFormat::Json => {
                serde_json::to_string_pretty(&resolution).map_err(sdclang::Error::from)?
            }
            ResolveFormat::Yaml => serde_yaml::to_string(&resolution)
                .map(|s| s.trim_end().to_string())
                .map_err(|e| sdclang::Error::Validation {
                    field: "yaml_output".to_string(),
                    message: format!("failed to serialize to YAML: {e}"),
                })?,
        };

        println!("{output}");
        Ok(())
    }
}

fn format_human(resolution: &Resolution) -> String {
    let config = &resolution.config;
    let or_none = |s: &str| {
        if s.is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };

    let mut lines = vec![
        format!(
            "SD Clang: {}",
            if config.enabled { "enabled" } else { "disabled" }
        ),
        format!("  primary path:    {}", or_none(&config.primary_path)),
        format!("  secondary path:  {}", or_none(&config.secondary_path)),
        format!("  primary flags:   {}", or_none(&config.primary_flags)),
        format!("  secondary flags: {}", or_none(&config.secondary_flags)),
        format!("  AE flag:         {}", or_none(&resolution.ae_flag)),
        format!("  {}", resolution.analysis),
        "Layers:".to_string(),
    ];

    lines.extend(resolution.origins.iter().map(|origin| match origin {
        ConfigOrigin::Defaults => "  built-in defaults".to_string(),
        ConfigOrigin::DefaultBlock { path } => format!("  default block ({})", path.display()),
        ConfigOrigin::ProductBlock { product } => format!("  product block '{product}'"),
        ConfigOrigin::Environment { variable } => format!("  environment {variable}"),
    }));

    lines.join("\n")
}
