//! Build script for sdclang-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("sdclang")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve the Snapdragon LLVM toolchain configuration")
        .long_about(
            "Resolve which SD Clang compiler paths and flags a product build uses, \
             from built-in defaults, a JSON device configuration, and the environment",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("build-root")
                .long("build-root")
                .help("Root of the source tree that configuration paths are relative to")
                .value_name("PATH")
                .global(true)
                .env("ANDROID_BUILD_TOP"),
        )
        .arg(
            Arg::new("product")
                .long("product")
                .help("Product whose configuration block applies")
                .value_name("NAME")
                .global(true)
                .env("TARGET_PRODUCT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Device configuration file, used in place of SDCLANG_CONFIG")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("ae-config")
                .long("ae-config")
                .help("AE flag file, used in place of SDCLANG_AE_CONFIG")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Print the resolved toolchain configuration")
                .long_about("Print the resolved configuration and the layers that produced it"),
            Command::new("vars")
                .about("Evaluate every published build variable")
                .long_about(
                    "Evaluate the toolchain and prebuilt variables against the current environment",
                ),
            Command::new("eval")
                .about("Evaluate a single build variable")
                .long_about("Evaluate one build variable, optionally expanding references"),
            Command::new("validate")
                .about("Validate a device configuration file")
                .long_about("Strictly parse a device configuration and check its default block"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("sdclang.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
