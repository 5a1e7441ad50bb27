//! CLI implementation for the `install-library` action

use anyhow::{Context, Result};

use crate::cli::commands::run_plan;
use crate::core::environment::EnvSnapshot;
use crate::core::library::{plan_install_library, ReleaseTable};

/// Execute the install-library action
pub async fn execute(env: &EnvSnapshot, dry_run: bool) -> Result<()> {
    let table = ReleaseTable::embedded()?;
    let plan = plan_install_library(env, &table)?;
    run_plan(&plan, env, dry_run)
        .await
        .context("HDF5 installation failed")?;
    Ok(())
}
