//! Build variables for the resolved toolchain.
//!
//! Every variable here is evaluated on demand. The path and flag variables
//! check their environment override at each evaluation, on top of the
//! `SDCLANG` override that was already applied once during resolution.

use std::sync::Arc;

use crate::config::environment::{
    Environment, PRIMARY_FLAGS_VAR, PRIMARY_PATH_VAR, SECONDARY_FLAGS_VAR, SECONDARY_PATH_VAR,
};
use crate::config::resolver::Resolution;
use crate::config::schema::ToolchainConfig;
use crate::error::Result;
use crate::variables::scope::VariableScope;

/// Whether the toolchain is enabled, as `"true"` or `"false"`.
pub const ENABLED_VARIABLE: &str = "SDClang";
/// Primary toolchain binary directory.
pub const PRIMARY_BIN_VARIABLE: &str = "SDClangBin";
/// Secondary toolchain binary directory.
pub const SECONDARY_BIN_VARIABLE: &str = "SDClangBin2";
/// Primary toolchain flags.
pub const PRIMARY_FLAGS_VARIABLE: &str = "SDClangFlags";
/// Secondary toolchain flags.
pub const SECONDARY_FLAGS_VARIABLE: &str = "SDClangFlags2";

/// Publishes the toolchain variables into a scope.
pub struct ToolchainVariables;

impl ToolchainVariables {
    /// Register the five toolchain variables.
    ///
    /// The closures share the frozen configuration; nothing is cached, so a
    /// change to an override between two evaluations shows up in the second.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the names is already registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::config::{MapEnvironment, ToolchainResolver};
    /// use sdclang::variables::{ToolchainVariables, VariableScope};
    ///
    /// let env = MapEnvironment::new().with("SDCLANG_PATH_2", "/opt/sdclang2/bin");
    /// let resolution = ToolchainResolver::new(env.clone()).resolve().unwrap();
    ///
    /// let mut scope = VariableScope::new();
    /// ToolchainVariables::register(&mut scope, &resolution).unwrap();
    ///
    /// assert_eq!(scope.evaluate("SDClangBin2", &env).unwrap(), "/opt/sdclang2/bin");
    /// let env = env.with("SDCLANG_PATH", "/env");
    /// assert_eq!(scope.evaluate("SDClangBin", &env).unwrap(), "/env");
    /// ```
    pub fn register(scope: &mut VariableScope, resolution: &Resolution) -> Result<()> {
        let config = Arc::clone(&resolution.config);
        scope.variable_func(ENABLED_VARIABLE, move |_| Ok(config.enabled.to_string()))?;

        Self::late_bound(scope, PRIMARY_BIN_VARIABLE, PRIMARY_PATH_VAR, resolution, |c, _| {
            c.primary_path.clone()
        })?;
        Self::late_bound(
            scope,
            SECONDARY_BIN_VARIABLE,
            SECONDARY_PATH_VAR,
            resolution,
            |c, _| c.secondary_path.clone(),
        )?;
        Self::late_bound(
            scope,
            PRIMARY_FLAGS_VARIABLE,
            PRIMARY_FLAGS_VAR,
            resolution,
            |c, ae| format!("{ae} {}", c.primary_flags),
        )?;
        Self::late_bound(
            scope,
            SECONDARY_FLAGS_VARIABLE,
            SECONDARY_FLAGS_VAR,
            resolution,
            |c, ae| format!("{ae} {}", c.secondary_flags),
        )?;

        Ok(())
    }

    fn late_bound(
        scope: &mut VariableScope,
        name: &str,
        override_var: &'static str,
        resolution: &Resolution,
        fallback: fn(&ToolchainConfig, &str) -> String,
    ) -> Result<()> {
        let config = Arc::clone(&resolution.config);
        let ae_flag = resolution.ae_flag.clone();
        scope.variable_func(name, move |ctx: &dyn Environment| {
            Ok(ctx
                .var(override_var)
                .unwrap_or_else(|| fallback(&config, &ae_flag)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::analysis::AnalysisStatus;
    use crate::config::environment::MapEnvironment;

    fn resolution(ae_flag: &str) -> Resolution {
        Resolution {
            config: Arc::new(ToolchainConfig {
                enabled: false,
                primary_path: "/a".into(),
                secondary_path: "/b".into(),
                primary_flags: "-O3".into(),
                secondary_flags: "-O2".into(),
            }),
            ae_flag: ae_flag.into(),
            analysis: AnalysisStatus::Disabled,
            origins: Vec::new(),
        }
    }

    fn scope(ae_flag: &str) -> VariableScope {
        let mut scope = VariableScope::new();
        ToolchainVariables::register(&mut scope, &resolution(ae_flag)).unwrap();
        scope
    }

    #[test]
    fn test_registers_all_variables() {
        let scope = scope("");
        assert_eq!(
            scope.names().collect::<Vec<_>>(),
            vec![
                "SDClang",
                "SDClangBin",
                "SDClangBin2",
                "SDClangFlags",
                "SDClangFlags2"
            ]
        );
    }

    #[test]
    fn test_fallback_values() {
        let scope = scope("-fae");
        let env = MapEnvironment::new();
        assert_eq!(scope.evaluate(ENABLED_VARIABLE, &env).unwrap(), "false");
        assert_eq!(scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap(), "/a");
        assert_eq!(scope.evaluate(SECONDARY_BIN_VARIABLE, &env).unwrap(), "/b");
        assert_eq!(scope.evaluate(PRIMARY_FLAGS_VARIABLE, &env).unwrap(), "-fae -O3");
        assert_eq!(scope.evaluate(SECONDARY_FLAGS_VARIABLE, &env).unwrap(), "-fae -O2");
    }

    #[test]
    fn test_empty_ae_flag_still_prepends_separator() {
        let scope = scope("");
        let env = MapEnvironment::new();
        assert_eq!(scope.evaluate(PRIMARY_FLAGS_VARIABLE, &env).unwrap(), " -O3");
    }

    #[test]
    fn test_overrides_win_at_evaluation_time() {
        let scope = scope("-fae");
        let env = MapEnvironment::new()
            .with(PRIMARY_PATH_VAR, "/env")
            .with(SECONDARY_PATH_VAR, "/env2")
            .with(PRIMARY_FLAGS_VAR, "-Og")
            .with(SECONDARY_FLAGS_VAR, "-Oz");
        assert_eq!(scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap(), "/env");
        assert_eq!(scope.evaluate(SECONDARY_BIN_VARIABLE, &env).unwrap(), "/env2");
        // The override replaces the whole value, AE flag included.
        assert_eq!(scope.evaluate(PRIMARY_FLAGS_VARIABLE, &env).unwrap(), "-Og");
        assert_eq!(scope.evaluate(SECONDARY_FLAGS_VARIABLE, &env).unwrap(), "-Oz");
    }

    #[test]
    fn test_empty_override_falls_back() {
        let scope = scope("");
        let env = MapEnvironment::new().with(PRIMARY_PATH_VAR, "");
        assert_eq!(scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap(), "/a");
    }

    #[test]
    fn test_enabled_ignores_environment() {
        // SDCLANG was consumed during resolution; the selector never rereads it.
        let scope = scope("");
        let env = MapEnvironment::new().with("SDCLANG", "true");
        assert_eq!(scope.evaluate(ENABLED_VARIABLE, &env).unwrap(), "false");
    }

    #[test]
    fn test_evaluation_is_idempotent_and_uncached() {
        let scope = scope("");
        let mut env = MapEnvironment::new();

        let first = scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap();
        let second = scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap();
        assert_eq!(first, second);

        env.set(PRIMARY_PATH_VAR, "/later");
        assert_eq!(scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap(), "/later");

        env.remove(PRIMARY_PATH_VAR);
        assert_eq!(scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap(), "/a");
    }

    #[test]
    fn test_evaluation_from_other_threads() {
        let scope = Arc::new(scope("-fae"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scope = Arc::clone(&scope);
                std::thread::spawn(move || {
                    let env = MapEnvironment::new().with(PRIMARY_PATH_VAR, format!("/t{i}"));
                    scope.evaluate(PRIMARY_BIN_VARIABLE, &env).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("/t{i}"));
        }
    }
}
