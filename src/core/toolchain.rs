//! Rust toolchain installation planning
//!
//! Downloads the channel's MSI from the Rust distribution server and installs
//! it silently into a fixed directory.

use crate::config::{defaults, urls, vars};
use crate::core::environment::EnvSnapshot;
use crate::core::plan::{CommandLine, Plan};
use crate::error::ProvisionError;

/// File name of the MSI installer for `channel`
pub fn installer_name(channel: &str) -> String {
    format!("rust-{channel}-{}.msi", defaults::RUST_HOST_TRIPLE)
}

/// Download URL of the MSI installer for `channel`
pub fn installer_url(channel: &str) -> String {
    format!("{}/{}", urls::RUST_DIST, installer_name(channel))
}

/// Path of a tool inside the installed toolchain
pub fn installed_tool(tool: &str) -> String {
    format!(r"{}\bin\{tool}", defaults::RUST_INSTALL_DIR)
}

/// Plan the `install-toolchain` action
pub fn plan_install_toolchain(env: &EnvSnapshot) -> Result<Plan, ProvisionError> {
    let channel = env.require(vars::CHANNEL)?;
    tracing::info!(channel, "planning Rust toolchain installation");

    let msi = installer_name(channel);
    let mut plan = Plan::new(format!("Installing Rust ({channel})"));
    plan.download(installer_url(channel), msi.clone());
    plan.run(
        CommandLine::new("msiexec")
            .args(["/i", msi.as_str()])
            .arg(format!("INSTALLDIR={}", defaults::RUST_INSTALL_DIR))
            .arg("/qn")
            .installer(),
    );
    plan.run(CommandLine::new(installed_tool("rustc")).arg("-vV"));
    plan.run(CommandLine::new(installed_tool("cargo")).arg("-vV"));
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plan::{FailureKind, Step};
    use proptest::prelude::*;

    #[test]
    fn test_missing_channel() {
        let env = EnvSnapshot::default();
        assert!(matches!(
            plan_install_toolchain(&env),
            Err(ProvisionError::MissingConfiguration { variable }) if variable == "CHANNEL"
        ));
    }

    #[test]
    fn test_stable_plan() {
        let env = EnvSnapshot::from_pairs([("CHANNEL", "stable")]);
        let plan = plan_install_toolchain(&env).unwrap();

        assert_eq!(plan.title, "Installing Rust (stable)");
        assert_eq!(plan.steps().len(), 4);

        let (url, dest) = plan.downloads().next().unwrap();
        assert_eq!(
            url,
            "https://static.rust-lang.org/dist/rust-stable-x86_64-pc-windows-msvc.msi"
        );
        assert_eq!(dest.to_str(), Some("rust-stable-x86_64-pc-windows-msvc.msi"));

        let commands: Vec<_> = plan.commands().collect();
        assert_eq!(
            commands[0].to_string(),
            r"msiexec /i rust-stable-x86_64-pc-windows-msvc.msi INSTALLDIR=C:\Rust /qn"
        );
        assert_eq!(commands[0].failure, FailureKind::Install);
        assert_eq!(commands[1].to_string(), r"C:\Rust\bin\rustc -vV");
        assert_eq!(commands[2].to_string(), r"C:\Rust\bin\cargo -vV");
        assert_eq!(commands[2].failure, FailureKind::Command);
    }

    #[test]
    fn test_download_comes_first() {
        let env = EnvSnapshot::from_pairs([("CHANNEL", "nightly")]);
        let plan = plan_install_toolchain(&env).unwrap();
        assert!(matches!(plan.steps()[0], Step::Download { .. }));
        assert!(plan.delta.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The installer URL always names the channel and the MSVC host triple
        #[test]
        fn prop_url_names_channel(channel in "[a-z0-9.-]{1,20}") {
            let url = installer_url(&channel);
            prop_assert!(url.starts_with("https://static.rust-lang.org/dist/"));
            let expected_suffix = format!("rust-{channel}-x86_64-pc-windows-msvc.msi");
            prop_assert!(url.ends_with(&expected_suffix));
        }
    }
}
