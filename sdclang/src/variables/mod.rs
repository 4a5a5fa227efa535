//! Build variables published from the resolved configuration.
//!
//! The resolved [`ToolchainConfig`](crate::config::ToolchainConfig) reaches
//! the rest of the build through named variables in a [`VariableScope`].

pub mod prebuilts;
pub mod scope;
pub mod toolchain;

pub use prebuilts::PrebuiltVariables;
pub use scope::{VariableFn, VariableScope};
pub use toolchain::ToolchainVariables;

use crate::config::resolver::Resolution;
use crate::error::Result;

/// Build a scope holding the prebuilt and toolchain variables.
///
/// # Errors
///
/// Returns an error only if two registrations collide, which the built-in
/// names never do.
///
/// # Examples
///
/// ```
/// use sdclang::config::{MapEnvironment, ToolchainResolver};
/// use sdclang::variables::global_scope;
///
/// let env = MapEnvironment::new().with("SDCLANG_PATH_2", "/opt/sdclang2/bin");
/// let resolution = ToolchainResolver::new(env.clone()).resolve().unwrap();
/// let scope = global_scope(&resolution).unwrap();
/// assert!(scope.contains("ClangBin"));
/// assert_eq!(scope.evaluate("SDClang", &env).unwrap(), "true");
/// ```
pub fn global_scope(resolution: &Resolution) -> Result<VariableScope> {
    let mut scope = VariableScope::new();
    PrebuiltVariables::register(&mut scope)?;
    ToolchainVariables::register(&mut scope, resolution)?;
    Ok(scope)
}
