//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables the provisioner reads; cleared so the host CI cannot leak in
pub const PROVISIONING_VARS: [&str; 6] = [
    "CHANNEL",
    "H5_SOURCE",
    "H5_VERSION",
    "CONDA",
    "PIN_VERSION",
    "RUST_LOG",
];

/// Test workspace context
///
/// Runs hdf5-ci in a temporary working directory so nothing it might
/// download can land in the source tree.
pub struct TestWorkspace {
    /// Temporary working directory
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Check if a file exists in the workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Run hdf5-ci with `args` and the given provisioning variables
    pub fn run(&self, args: &[&str], vars: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hdf5-ci"));
        cmd.current_dir(self.path());
        for var in PROVISIONING_VARS {
            cmd.env_remove(var);
        }
        cmd.envs(vars.iter().copied());
        cmd.args(args);
        cmd.output().expect("Failed to execute hdf5-ci")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a run as text
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a run as text
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
