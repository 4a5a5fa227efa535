//! Command to evaluate a single build variable.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Evaluate a single build variable.
#[derive(Args)]
pub struct EvalCommand {
    /// Variable name (e.g. SDClangBin)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Expand ${Name} references in the value
    #[arg(long)]
    pub expand: bool,
}

impl EvalCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (env, scope) = global.scope()?;

        let value = if self.expand {
            scope.evaluate_expanded(&self.name, &env)?
        } else {
            scope.evaluate(&self.name, &env)?
        };

        println!("{value}");
        Ok(())
    }
}
