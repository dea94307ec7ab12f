//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Configuration fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix table used by the request tests.
#[allow(dead_code)]
pub const SHOP_CONFIG: &str = r"
prefixes:
  - prefix: shop
    types: [product, product_category]
    handler: shop
  - prefix: another
    types:
      product_category: another
";

/// Test environment with isolated data and working directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory, also the working directory
    pub temp_path: PathBuf,
    /// Path to the pathhist data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; pathhist creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("pathhist-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A test environment whose user configuration is `yaml`.
    pub fn with_config(yaml: &str) -> Self {
        let env = Self::new();
        env.write_user_config(yaml);
        env
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Runs in the temporary directory with every `PATHHIST_*` variable
    /// cleared, so neither the caller's environment nor stray project
    /// files leak into the test.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathhist").expect("Failed to find pathhist binary");
        cmd.current_dir(&self.temp_path);
        for var in [
            "PATHHIST_DATA_DIR",
            "PATHHIST_BUSY_TIMEOUT",
            "PATHHIST_DISABLE_AUTOINIT",
            "PATHHIST_OUTPUT_FORMAT",
            "PATHHIST_LOG_MODE",
            "PATHHIST_TABLE",
            "PATHHIST_REDIRECT_STATUS",
            "PATHHIST_CASCADE_SOFT_DELETED",
            "PATHHIST_MAXIMUM_LOCK_WAIT_SECONDS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("pathhist.db")
    }

    /// Write `config.yaml` in the data directory.
    pub fn write_user_config(&self, yaml: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data directory");
        std::fs::write(self.data_dir.join("config.yaml"), yaml)
            .expect("Failed to write configuration");
    }

    /// Write a file in the working directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Run `pathhist` with `args` and return trimmed stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run pathhist");

        assert!(
            output.status.success(),
            "pathhist {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Record `link` as the current path of `related_type#related_id`.
    ///
    /// Returns the new record id.
    pub fn track(&self, related_type: &str, related_id: i64, link: &str) -> i64 {
        self.run(&["track", related_type, &related_id.to_string(), link])
            .parse()
            .expect("Output is not a record id")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
