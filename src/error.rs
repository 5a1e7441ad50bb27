//! Error types for hdf5-ci
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Top-level provisioning error type
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Required environment variable is absent or empty
    #[error("Missing configuration: environment variable {variable} is not set")]
    MissingConfiguration { variable: String },

    /// Environment variable holds a value outside its allowed set
    #[error("Invalid configuration: {variable}={value:?} (expected one of: {})", expected.join(", "))]
    InvalidConfiguration {
        variable: String,
        value: String,
        expected: Vec<String>,
    },

    /// Version has no entry in the release table
    #[error("Unsupported HDF5 version '{version}' (known versions: {})", supported.join(", "))]
    UnsupportedVersion {
        version: String,
        supported: Vec<String>,
    },

    /// Download failed
    #[error("Download failed: {0}")]
    DownloadFailure(#[from] DownloadError),

    /// Installer process exited non-zero
    #[error("Installer failed: `{command}` exited with {}", describe_code(*code))]
    InstallFailure { command: String, code: Option<i32> },

    /// Any other sub-process exited non-zero
    #[error("Command failed: `{command}` exited with {}", describe_code(*code))]
    CommandFailure { command: String, code: Option<i32> },

    /// Sub-process could not be started
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Embedded release table is malformed
    #[error("Invalid release table: {0}")]
    ReleaseTable(String),
}

impl ProvisionError {
    /// Process exit code to report for this error.
    ///
    /// Failing sub-processes propagate their own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InstallFailure { code, .. } | Self::CommandFailure { code, .. } => {
                code.filter(|c| *c != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code (terminated by signal)".to_string(), |c| format!("exit code {c}"))
}
