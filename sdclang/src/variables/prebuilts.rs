//! Build variables for the Clang prebuilts.
//!
//! The location of the regular Clang prebuilts follows the same pattern as
//! the sdclang toolchain: a built-in value that an environment variable can
//! replace at evaluation time.

use crate::config::environment::Environment;
use crate::error::Result;
use crate::variables::scope::VariableScope;

/// Default prebuilts root, relative to the source tree.
pub const CLANG_DEFAULT_BASE: &str = "prebuilts/clang/host";
/// Default prebuilt Clang version directory.
pub const CLANG_DEFAULT_VERSION: &str = "clang-r328903";
/// Default Clang release version.
pub const CLANG_DEFAULT_SHORT_VERSION: &str = "7.0.2";

/// Host tag used in prebuilt directory names.
#[must_use]
pub fn host_prebuilt_tag() -> &'static str {
    if cfg!(target_os = "linux") {
        "linux-x86"
    } else if cfg!(target_os = "macos") {
        "darwin-x86"
    } else {
        "windows-x86"
    }
}

/// Publishes the Clang prebuilt variables into a scope.
pub struct PrebuiltVariables;

impl PrebuiltVariables {
    /// Register the prebuilt variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the names is already registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdclang::config::MapEnvironment;
    /// use sdclang::variables::{PrebuiltVariables, VariableScope};
    ///
    /// let mut scope = VariableScope::new();
    /// PrebuiltVariables::register(&mut scope).unwrap();
    ///
    /// let env = MapEnvironment::new()
    ///     .with("LLVM_PREBUILTS_BASE", "/opt/llvm")
    ///     .with("LLVM_PREBUILTS_VERSION", "clang-r999");
    /// let bin = scope.evaluate_expanded("ClangBin", &env).unwrap();
    /// assert!(bin.starts_with("/opt/llvm/"));
    /// assert!(bin.ends_with("/clang-r999/bin"));
    /// ```
    pub fn register(scope: &mut VariableScope) -> Result<()> {
        scope.static_variable("HostPrebuiltTag", host_prebuilt_tag())?;
        scope.static_variable("ClangDefaultBase", CLANG_DEFAULT_BASE)?;

        Self::overridable(scope, "ClangBase", "LLVM_PREBUILTS_BASE", "${ClangDefaultBase}")?;
        Self::overridable(scope, "ClangVersion", "LLVM_PREBUILTS_VERSION", CLANG_DEFAULT_VERSION)?;
        Self::overridable(
            scope,
            "ClangShortVersion",
            "LLVM_RELEASE_VERSION",
            CLANG_DEFAULT_SHORT_VERSION,
        )?;

        scope.static_variable("ClangPath", "${ClangBase}/${HostPrebuiltTag}/${ClangVersion}")?;
        scope.static_variable("ClangBin", "${ClangPath}/bin")?;
        scope.static_variable(
            "ClangAsanLibDir",
            "${ClangPath}/lib64/clang/${ClangShortVersion}/lib/linux",
        )?;

        // The wrapper is a command prefix, so it carries its own separator.
        scope.variable_func("CcWrapper", |ctx| {
            Ok(ctx
                .var("CC_WRAPPER")
                .map(|wrapper| wrapper + " ")
                .unwrap_or_default())
        })?;

        Self::overridable(
            scope,
            "FlexExec",
            "FLEX_EXEC",
            "prebuilts/misc/${HostPrebuiltTag}/flex/flex-2.5.39",
        )?;
        Self::overridable(
            scope,
            "BisonExec",
            "BISON_EXEC",
            "prebuilts/misc/${HostPrebuiltTag}/bison/bison",
        )?;

        Ok(())
    }

    fn overridable(
        scope: &mut VariableScope,
        name: &str,
        override_var: &'static str,
        default: &'static str,
    ) -> Result<()> {
        scope.variable_func(name, move |ctx: &dyn Environment| {
            Ok(ctx.var(override_var).unwrap_or_else(|| default.to_string()))
        })
    }
}
