//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - A temporary build tree to hold configuration files
//! - Command builders isolated from the host environment
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host can't leak into tests.
const SDCLANG_ENV_VARS: &[&str] = &[
    "ANDROID_BUILD_TOP",
    "TARGET_PRODUCT",
    "SDCLANG_AE_CONFIG",
    "SDCLANG_CONFIG",
    "SDCLANG_SA_ENABLED",
    "SDCLANG",
    "SDCLANG_PATH",
    "SDCLANG_PATH_2",
    "SDCLANG_COMMON_FLAGS",
    "SDCLANG_COMMON_FLAGS_2",
    "SDCLANG_LOG_MODE",
    "SDCLANG_OUTPUT_FORMAT",
    "LLVM_PREBUILTS_BASE",
    "LLVM_PREBUILTS_VERSION",
    "LLVM_RELEASE_VERSION",
    "CC_WRAPPER",
    "FLEX_EXEC",
    "BISON_EXEC",
];

/// A device configuration with a default block and two product blocks.
#[allow(dead_code)]
pub const DEVICE_CONFIG: &str = r#"{
    "default": {
        "SDCLANG_PATH": "/opt/sdclang/bin",
        "SDCLANG_PATH_2": "/opt/sdclang2/bin",
        "SDCLANG_FLAGS": "-O3"
    },
    "lahaina": {
        "SDCLANG_PATH": "/opt/lahaina/bin",
        "SDCLANG_FLAGS_2": "-Os"
    },
    "kona": {
        "SDCLANG": false
    }
}"#;

/// Test environment rooted at a temporary build tree.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the build root
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty build tree.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Create a build tree with `DEVICE_CONFIG` at `device/sdclang.json`.
    pub fn with_device_config() -> Self {
        let env = Self::new();
        env.write("device/sdclang.json", DEVICE_CONFIG);
        env
    }

    /// Get a bare command builder with the host environment scrubbed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("sdclang").expect("Failed to find sdclang binary");
        for var in SDCLANG_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder pointed at this build tree.
    ///
    /// The build root is passed with `--build-root` and the device config is
    /// located through `SDCLANG_CONFIG`, the way a build would find it.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--build-root")
            .arg(&self.root)
            .env("SDCLANG_CONFIG", "device/sdclang.json")
            .env("SDCLANG_AE_CONFIG", "device/ae.json");
        cmd
    }

    /// Get the build root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a file beneath the build root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        std::fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create test directory");
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Run `sdclang eval NAME` and return the trimmed-of-newline stdout.
    pub fn eval(&self, name: &str) -> String {
        let output = self
            .command()
            .arg("eval")
            .arg(name)
            .output()
            .expect("Failed to run eval command");

        assert!(
            output.status.success(),
            "Eval failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.strip_suffix('\n').unwrap_or(&stdout).to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
