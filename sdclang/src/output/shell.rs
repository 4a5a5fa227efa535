//! Shell detection and export formatting.

use crate::config::environment::Environment;
use crate::Result;

/// Supported shell types for export formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// Bourne Again Shell (bash).
    Bash,
    /// Z Shell (zsh).
    Zsh,
    /// Friendly Interactive Shell (fish).
    Fish,
    /// `PowerShell`.
    PowerShell,
}

impl ShellType {
    /// Detect the current shell from the environment.
    ///
    /// Detection precedence:
    /// 1. `ZSH_VERSION` - indicates zsh
    /// 2. `FISH_VERSION` - indicates fish
    /// 3. `PSModulePath` - indicates `PowerShell`
    /// 4. `SHELL` environment variable (path like `/bin/bash`)
    /// 5. Default to bash if unable to determine
    #[must_use]
    pub fn detect(env: &dyn Environment) -> Self {
        if env.var("ZSH_VERSION").is_some() {
            return Self::Zsh;
        }
        if env.var("FISH_VERSION").is_some() {
            return Self::Fish;
        }
        if env.var("PSModulePath").is_some() {
            return Self::PowerShell;
        }

        match env.var("SHELL") {
            Some(shell_path) if shell_path.contains("zsh") => Self::Zsh,
            Some(shell_path) if shell_path.contains("fish") => Self::Fish,
            Some(shell_path) if shell_path.contains("pwsh") || shell_path.contains("powershell") => {
                Self::PowerShell
            }
            _ => Self::Bash,
        }
    }

    /// Parse a shell type from a string.
    ///
    /// Accepts (case-insensitive) "bash", "sh", "zsh", "fish", "powershell",
    /// "pwsh" and "ps".
    ///
    /// # Errors
    ///
    /// Returns an error if the shell name is not recognized.
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bash" | "sh" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "powershell" | "pwsh" | "ps" => Ok(Self::PowerShell),
            _ => Err(crate::Error::Validation {
                field: "shell".to_string(),
                message: format!(
                    "unknown shell type '{s}': supported shells are bash, zsh, fish, powershell"
                ),
            }),
        }
    }

    /// Format an export statement for this shell type.
    ///
    /// Values are quoted so that flag strings survive word splitting.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::output::ShellType;
    ///
    /// assert_eq!(ShellType::Bash.format_export("SDClang", "true"), "export SDClang='true'");
    /// assert_eq!(ShellType::Fish.format_export("SDClang", "true"), "set -x SDClang 'true'");
    /// assert_eq!(
    ///     ShellType::PowerShell.format_export("SDClang", "true"),
    ///     "$env:SDClang=\"true\""
    /// );
    /// ```
    #[must_use]
    pub fn format_export(&self, var: &str, value: &str) -> String {
        match self {
            Self::Bash | Self::Zsh => {
                format!("export {var}='{}'", value.replace('\'', r"'\''"))
            }
            Self::Fish => format!(
                "set -x {var} '{}'",
                value.replace('\\', r"\\").replace('\'', r"\'")
            ),
            Self::PowerShell => {
                let mut escaped = String::with_capacity(value.len());
                for c in value.chars() {
                    if matches!(c, '`' | '"' | '$') {
                        escaped.push('`');
                    }
                    escaped.push(c);
                }
                format!("$env:{var}=\"{escaped}\"")
            }
        }
    }
}
