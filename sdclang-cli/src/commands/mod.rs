//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Print the resolved toolchain configuration
//! - `vars`: Evaluate every published build variable
//! - `eval`: Evaluate a single build variable
//! - `validate`: Validate a device configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod eval;
pub mod resolve;
pub mod validate;
pub mod vars;

pub use completions::CompletionsCommand;
pub use eval::EvalCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
pub use vars::VarsCommand;
