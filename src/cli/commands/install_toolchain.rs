//! CLI implementation for the `install-toolchain` action

use anyhow::{Context, Result};

use crate::cli::commands::run_plan;
use crate::core::environment::EnvSnapshot;
use crate::core::toolchain::plan_install_toolchain;

/// Execute the install-toolchain action
pub async fn execute(env: &EnvSnapshot, dry_run: bool) -> Result<()> {
    let plan = plan_install_toolchain(env)?;
    run_plan(&plan, env, dry_run)
        .await
        .context("Rust toolchain installation failed")?;
    Ok(())
}
