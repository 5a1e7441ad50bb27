//! CLI action implementations
//!
//! Each action is implemented in its own submodule: it plans with
//! [`crate::core`] and hands the plan to [`run_plan`].

pub mod install_library;
pub mod install_toolchain;

use anyhow::Result;
use clap::ValueEnum;

use crate::cli::output::{print_detail, print_info, print_success};
use crate::cli::runner::{DryRunner, SystemRunner};
use crate::config::vars;
use crate::core::environment::EnvSnapshot;
use crate::core::plan::{execute, Plan, StepOutcome};

/// Available actions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Download and silently install the Rust toolchain for $CHANNEL
    #[value(alias = "install-rust")]
    InstallToolchain,

    /// Install HDF5 $H5_VERSION from $H5_SOURCE (conda or msi)
    #[value(alias = "install-hdf5")]
    InstallLibrary,

    /// Build and test the workspace against the installed HDF5
    RunTests,
}

impl Action {
    /// Execute the action against the current process environment
    pub async fn run(self, dry_run: bool) -> Result<()> {
        let env = EnvSnapshot::capture();
        match self {
            Self::InstallToolchain => install_toolchain::execute(&env, dry_run).await,
            Self::InstallLibrary => install_library::execute(&env, dry_run).await,
            Self::RunTests => run_tests::execute(&env, dry_run).await,
        }
    }
}

/// Print the plan banner and environment changes, then run its steps in order
pub async fn run_plan(plan: &Plan, env: &EnvSnapshot, dry_run: bool) -> Result<Vec<StepOutcome>> {
    print_info(&format!("{}...", plan.title));

    for (key, value) in plan.delta.variables() {
        print_info(&format!("\nSetting {key} to {value}..."));
    }
    for dir in plan.delta.path_prepends() {
        print_info(&format!("\nPrepending {dir} to %{}%...", vars::PATH));
    }
    if dry_run {
        if let Some(path) = plan.delta.search_path(env.get(vars::PATH)) {
            print_detail(&format!("{}={path}", vars::PATH));
        }
    }

    let outcomes = if dry_run {
        execute(plan, &mut DryRunner).await?
    } else {
        execute(plan, &mut SystemRunner::new()).await?
    };

    if dry_run {
        print_success(&format!("Dry run: {} step(s) planned", outcomes.len()));
    } else {
        print_success(&format!("{} step(s) completed", outcomes.len()));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_and_aliases() {
        assert_eq!(
            Action::from_str("install-toolchain", false),
            Ok(Action::InstallToolchain)
        );
        assert_eq!(Action::from_str("install-rust", false), Ok(Action::InstallToolchain));
        assert_eq!(Action::from_str("install-library", false), Ok(Action::InstallLibrary));
        assert_eq!(Action::from_str("install-hdf5", false), Ok(Action::InstallLibrary));
        assert_eq!(Action::from_str("run-tests", false), Ok(Action::RunTests));
        assert!(Action::from_str("deploy", false).is_err());
    }

    #[tokio::test]
    async fn test_dry_run_plans_without_side_effects() {
        let mut plan = Plan::new("Installing HDF5 (1.8.21, source=msi)");
        plan.download("https://example.invalid/hdf5.zip", "hdf5.zip");
        plan.run(crate::core::plan::CommandLine::new("7z").args(["x", "hdf5.zip", "-y"]));

        let outcomes = run_plan(&plan, &EnvSnapshot::default(), true).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| *o == StepOutcome::Planned));
        assert!(!std::path::Path::new("hdf5.zip").exists());
    }
}
