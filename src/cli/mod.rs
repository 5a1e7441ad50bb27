//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;
pub mod runner;

use anyhow::Result;
use clap::Parser;

use commands::Action;

/// hdf5-ci - provision a Windows CI agent for HDF5 development
///
/// Installs the Rust toolchain and the HDF5 library, then builds and tests
/// the workspace. All settings come from environment variables
/// (CHANNEL, H5_SOURCE, H5_VERSION, CONDA, PIN_VERSION).
#[derive(Parser, Debug)]
#[command(name = "hdf5-ci")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the steps and environment changes without executing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,
}

impl Cli {
    /// Execute the selected action
    pub async fn run(self) -> Result<()> {
        self.action.run(self.dry_run).await
    }
}
