//! Main entry point for the sdclang CLI.
//!
//! This is the command-line interface to sdclang toolchain resolution.
//! It provides commands for inspecting the resolved configuration:
//! - `resolve`: Print the resolved toolchain configuration
//! - `vars`: Evaluate every published build variable
//! - `eval`: Evaluate a single build variable
//! - `validate`: Validate a device configuration file
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use sdclang::config::ProcessEnvironment;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity; library diagnostics go through it
    let logger = sdclang::init_logger(cli.verbose, cli.quiet, &ProcessEnvironment);
    if logger.install().is_err() {
        logger.warn("a log backend was already installed");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        build_root: cli.build_root,
        product: cli.product,
        config: cli.config,
        ae_config: cli.ae_config,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Vars(cmd) => cmd.execute(&global),
        cli::Command::Eval(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
