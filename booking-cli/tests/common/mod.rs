//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Fixtures for rooms and reservations

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into tests.
const HOST_VARS: [&str; 7] = [
    "BOOKING_DATA_DIR",
    "BOOKING_DATABASE_PATH",
    "BOOKING_MAXIMUM_LOCK_WAIT_SECONDS",
    "BOOKING_PRINCIPAL",
    "BOOKING_OUTPUT_FORMAT",
    "BOOKING_DISABLE_AUTOINIT",
    "BOOKING_LOG_MODE",
];

/// Test environment with isolated data directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory used as the working directory
/// - A separate data directory for the booking database
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the booking data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the CLI creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("booking-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without `--data-dir`.
    ///
    /// Runs inside the temp directory with host `BOOKING_*` variables removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("booking").expect("Failed to find booking binary");
        cmd.current_dir(&self.temp_path);
        for var in HOST_VARS {
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

    /// Write a file under the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Register a room and return its id.
    pub fn add_room(&self, name: &str) -> String {
        let output = self
            .command()
            .args(["room", "add", name])
            .output()
            .expect("Failed to run room add");

        assert!(
            output.status.success(),
            "room add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        stdout_line(&output.stdout)
    }

    /// Create a reservation through flags and return its id.
    ///
    /// # Panics
    /// Panics if the create command fails.
    pub fn create(&self, room: &str, from: &str, to: &str) -> String {
        let output = self
            .command()
            .args(["create", "--room", room, "--from", from, "--to", to])
            .output()
            .expect("Failed to run create command");

        assert!(
            output.status.success(),
            "create failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        stdout_line(&output.stdout)
    }

    /// List reservations with extra arguments and return stdout.
    pub fn list(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("list")
            .args(args)
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "list failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Fetch one reservation as JSON.
    pub fn get(&self, id: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["get", id])
            .output()
            .expect("Failed to run get command");

        assert!(
            output.status.success(),
            "get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("get did not print JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the trimmed single line printed on stdout.
#[allow(dead_code)]
pub fn stdout_line(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).trim().to_string()
}
