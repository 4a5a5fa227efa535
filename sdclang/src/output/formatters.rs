//! Output formatter implementations.

use crate::{Error, Result};

use super::{OutputFormatter, ShellType};

/// Validates that a string is a valid environment variable name.
///
/// Valid names must:
/// - Start with a letter or underscore
/// - Contain only letters, digits, and underscores
fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn check_env_var_name(name: &str) -> Result<()> {
    if is_valid_env_var_name(name) {
        Ok(())
    } else {
        Err(Error::Validation {
            field: "environment_variable".to_string(),
            message: format!(
                "invalid environment variable name '{name}': must contain only alphanumeric characters and underscores, and start with a letter or underscore"
            ),
        })
    }
}

fn to_mapping(variables: &[(String, String)]) -> serde_json::Map<String, serde_json::Value> {
    variables
        .iter()
        .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
        .collect()
}

/// Formatter for shell-specific export statements.
pub struct ExportFormatter {
    shell: ShellType,
}

impl ExportFormatter {
    /// Create a new export formatter for `shell`.
    #[must_use]
    pub fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl OutputFormatter for ExportFormatter {
    fn format(&self, variables: &[(String, String)]) -> Result<String> {
        let mut exports = Vec::with_capacity(variables.len());
        for (name, value) in variables {
            check_env_var_name(name)?;
            exports.push(self.shell.format_export(name, value));
        }
        Ok(exports.join("\n"))
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, variables: &[(String, String)]) -> Result<String> {
        serde_json::to_string_pretty(&to_mapping(variables)).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, variables: &[(String, String)]) -> Result<String> {
        serde_yaml::to_string(&to_mapping(variables))
            .map(|s| s.trim_end().to_string())
            .map_err(|e| Error::Validation {
                field: "yaml_output".to_string(),
                message: format!("failed to serialize to YAML: {e}"),
            })
    }
}

/// Formatter for dotenv (.env file) format.
///
/// Values are always double-quoted; flag strings contain spaces.
pub struct DotenvFormatter;

impl OutputFormatter for DotenvFormatter {
    fn format(&self, variables: &[(String, String)]) -> Result<String> {
        let mut lines = Vec::with_capacity(variables.len());
        for (name, value) in variables {
            check_env_var_name(name)?;
            let escaped = value.replace('\\', r"\\").replace('"', "\\\"");
            lines.push(format!("{name}=\"{escaped}\""));
        }
        Ok(lines.join("\n"))
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, variables: &[(String, String)]) -> Result<String> {
        if variables.is_empty() {
            return Ok("No variables.".to_string());
        }

        let width = variables.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        Ok(variables
            .iter()
            .map(|(name, value)| format!("{name:<width$} = {value}"))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables() -> Vec<(String, String)> {
        vec![
            ("SDClang".to_string(), "true".to_string()),
            ("SDClangBin".to_string(), "/opt/sdclang/bin".to_string()),
            ("SDClangFlags".to_string(), " -O3 -fvectorize".to_string()),
        ]
    }

    #[test]
    fn test_valid_env_var_names() {
        assert!(is_valid_env_var_name("SDClangBin2"));
        assert!(is_valid_env_var_name("_PRIVATE"));
        assert!(!is_valid_env_var_name(""));
        assert!(!is_valid_env_var_name("2FAST"));
        assert!(!is_valid_env_var_name("HAS-DASH"));
    }

    #[test]
    fn test_export_formatter() {
        let output = ExportFormatter::new(ShellType::Bash)
            .format(&variables())
            .unwrap();
        assert_eq!(
            output,
            "export SDClang='true'\nexport SDClangBin='/opt/sdclang/bin'\nexport SDClangFlags=' -O3 -fvectorize'"
        );
    }

    #[test]
    fn test_export_rejects_invalid_name() {
        let vars = vec![("not-valid".to_string(), "x".to_string())];
        let err = ExportFormatter::new(ShellType::Bash)
            .format(&vars)
            .unwrap_err();
        assert!(err.to_string().contains("invalid environment variable name"));
    }

    #[test]
    fn test_json_formatter_preserves_values() {
        let output = JsonFormatter.format(&variables()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["SDClangBin"], "/opt/sdclang/bin");
        assert_eq!(parsed["SDClangFlags"], " -O3 -fvectorize");
    }

    #[test]
    fn test_yaml_formatter() {
        let output = YamlFormatter.format(&variables()).unwrap();
        let parsed: std::collections::HashMap<String, String> =
            serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed["SDClang"], "true");
        assert_eq!(parsed["SDClangFlags"], " -O3 -fvectorize");
    }

    #[test]
    fn test_dotenv_formatter_escapes() {
        let vars = vec![("X".to_string(), r#"say "hi" \o/"#.to_string())];
        let output = DotenvFormatter.format(&vars).unwrap();
        assert_eq!(output, r#"X="say \"hi\" \\o/""#);
    }

    #[test]
    fn test_human_formatter_aligns_names() {
        let output = HumanFormatter.format(&variables()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "SDClang      = true");
        assert_eq!(lines[1], "SDClangBin   = /opt/sdclang/bin");
    }

    #[test]
    fn test_human_formatter_empty() {
        assert_eq!(HumanFormatter.format(&[]).unwrap(), "No variables.");
    }
}
