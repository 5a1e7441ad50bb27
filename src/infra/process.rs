//! External process execution
//!
//! Commands inherit stdio so their output streams straight into the CI log.
//! There is no timeout: a hung child hangs the invocation.

use std::ffi::OsString;
use std::path::PathBuf;

use tokio::process::Command;

use crate::config::vars;
use crate::core::plan::CommandLine;
use crate::error::ProvisionError;

/// Resolve the program of `cmd` against the search path the child will see.
///
/// `Command` resolves bare program names using the parent's `PATH`, so
/// directories prepended for the child would otherwise be ignored for the
/// lookup itself. Falls back to the bare name when nothing is found.
pub fn resolve_program(cmd: &CommandLine) -> PathBuf {
    let search_path: Option<OsString> = cmd
        .env
        .get(vars::PATH)
        .map(OsString::from)
        .or_else(|| std::env::var_os(vars::PATH));
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match which::which_in(&cmd.program, search_path, cwd) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("could not resolve '{}' ({e}), using it as given", cmd.program);
            PathBuf::from(&cmd.program)
        }
    }
}

/// Run `cmd` to completion and return its exit code.
///
/// A non-zero exit becomes the command's failure error
/// ([`ProvisionError::InstallFailure`] or [`ProvisionError::CommandFailure`]).
pub async fn run_command(cmd: &CommandLine) -> Result<i32, ProvisionError> {
    let program = resolve_program(cmd);
    tracing::debug!("spawning {} with {} env override(s)", program.display(), cmd.env.len());

    let status = Command::new(&program)
        .args(&cmd.args)
        .envs(&cmd.env)
        .status()
        .await
        .map_err(|e| ProvisionError::Spawn {
            program: cmd.program.clone(),
            error: e.to_string(),
        })?;

    if status.success() {
        Ok(status.code().unwrap_or(0))
    } else {
        Err(cmd.failure_error(status.code()))
    }
}
