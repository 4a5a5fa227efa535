//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, EvalCommand, ResolveCommand, ValidateCommand, VarsCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting the resolved sdclang toolchain configuration.
#[derive(Parser)]
#[command(name = "sdclang")]
#[command(
    version,
    about = "Resolve the Snapdragon LLVM toolchain configuration",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Root of the source tree that configuration paths are relative to
    #[arg(long, value_name = "PATH", global = true, env = "ANDROID_BUILD_TOP")]
    pub build_root: Option<PathBuf>,

    /// Product whose configuration block applies
    #[arg(long, value_name = "NAME", global = true, env = "TARGET_PRODUCT")]
    pub product: Option<String>,

    /// Device configuration file, used in place of SDCLANG_CONFIG
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// AE flag file, used in place of SDCLANG_AE_CONFIG
    #[arg(long, value_name = "PATH", global = true)]
    pub ae_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved toolchain configuration
    Resolve(ResolveCommand),

    /// Evaluate every published build variable
    Vars(VarsCommand),

    /// Evaluate a single build variable
    Eval(EvalCommand),

    /// Validate a device configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
