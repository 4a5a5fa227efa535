//! Static-analysis flag augmentation.

use std::fmt;

use serde::Serialize;

use crate::config::environment::{
    Environment, EnvironmentConfig, ANALYSIS_BASE_VAR, ANALYSIS_ENABLED_VAR,
};
use crate::config::schema::ToolchainConfig;

/// Directive that turns a compile into a compile-and-analyze.
pub const ANALYZE_DIRECTIVE: &str = "--compile-and-analyze";

/// Directory, beneath the analysis base, that receives analysis output.
pub const ANALYSIS_SUBDIR: &str = "llvmsa";

/// Outcome of the static-analysis step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Analysis was requested; holds the augmented primary flags.
    Enabled {
        /// The primary flags after augmentation.
        flags: String,
    },
    /// Analysis was not requested.
    Disabled,
    /// No device configuration loaded, so the step did not run.
    Skipped,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled { flags } => write!(f, "Clang SA is enabled: {flags}"),
            Self::Disabled => write!(f, "Clang SA is not enabled"),
            Self::Skipped => write!(f, "Clang SA skipped: no device config"),
        }
    }
}

/// Appends the static-analysis directive to the primary flags.
pub struct AnalysisAugmenter;

impl AnalysisAugmenter {
    /// Augment `config` if `SDCLANG_SA_ENABLED` is true.
    ///
    /// This is plain flag-text manipulation and happens whether or not the
    /// toolchain itself is enabled. The resolver only calls it once a device
    /// configuration has been merged.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::config::{AnalysisAugmenter, MapEnvironment, ToolchainConfig};
    ///
    /// let mut config = ToolchainConfig { primary_flags: "-O3".into(), ..Default::default() };
    /// let env = MapEnvironment::new()
    ///     .with("SDCLANG_SA_ENABLED", "true")
    ///     .with("ANDROID_BUILD_TOP", "/src");
    /// AnalysisAugmenter::apply(&mut config, &env);
    /// assert_eq!(config.primary_flags, "-O3 --compile-and-analyze /src/llvmsa");
    /// ```
    pub fn apply(config: &mut ToolchainConfig, env: &dyn Environment) -> AnalysisStatus {
        if !EnvironmentConfig::flag(env, ANALYSIS_ENABLED_VAR) {
            let status = AnalysisStatus::Disabled;
            log::info!("{status}");
            return status;
        }

        let base = env.var(ANALYSIS_BASE_VAR).unwrap_or_default();
        config.primary_flags = [
            config.primary_flags.as_str(),
            ANALYZE_DIRECTIVE,
            &format!("{base}/{ANALYSIS_SUBDIR}"),
        ]
        .join(" ");

        let status = AnalysisStatus::Enabled {
            flags: config.primary_flags.clone(),
        };
        log::info!("{status}");
        status
    }
}
