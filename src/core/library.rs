//! HDF5 library installation planning
//!
//! HDF5 comes either from a conda environment pinned to the requested version,
//! or from a prebuilt MSI in the HDF Group release archive. The MSI artifacts
//! are described by a [`ReleaseTable`] loaded from data, so supporting a new
//! version means adding a table entry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{self, defaults, urls, vars};
use crate::core::environment::EnvSnapshot;
use crate::core::plan::{CommandLine, Plan};
use crate::error::ProvisionError;

/// Where HDF5 is installed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibrarySource {
    /// Isolated conda environment
    Managed,
    /// System-wide MSI installer
    Direct,
}

impl LibrarySource {
    /// Accepted spellings, for error messages
    pub const ACCEPTED: [&'static str; 4] = ["conda", "managed", "msi", "direct"];

    /// Read the source selector from the environment
    ///
    /// Returns `Ok(None)` when the variable is unset.
    pub fn from_env(env: &EnvSnapshot) -> Result<Option<Self>, ProvisionError> {
        env.get(vars::H5_SOURCE)
            .map(|value| {
                value
                    .parse()
                    .map_err(|()| ProvisionError::InvalidConfiguration {
                        variable: vars::H5_SOURCE.to_string(),
                        value: value.to_string(),
                        expected: Self::ACCEPTED.iter().map(ToString::to_string).collect(),
                    })
            })
            .transpose()
    }
}

impl FromStr for LibrarySource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conda" | "managed" => Ok(Self::Managed),
            "msi" | "direct" => Ok(Self::Direct),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LibrarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Managed => write!(f, "conda"),
            Self::Direct => write!(f, "msi"),
        }
    }
}

/// Prebuilt HDF5 release artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryRelease {
    /// Full version, e.g. "1.8.21"
    pub version: String,
    /// Archive path relative to the release's `bin/` directory
    pub archive: String,
    /// MSI path inside the extracted archive
    pub installer: String,
}

impl LibraryRelease {
    /// Release family: the version without its last component ("1.8.21" -> "1.8")
    pub fn family(&self) -> &str {
        self.version
            .rsplit_once('.')
            .map_or(self.version.as_str(), |(family, _)| family)
    }

    /// Download URL of the release archive
    pub fn download_url(&self) -> String {
        format!(
            "{}/hdf5-{}/hdf5-{}/bin/{}",
            urls::HDF5_PREV_RELEASES,
            self.family(),
            self.version,
            self.archive
        )
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseFile {
    #[serde(default)]
    release: Vec<LibraryRelease>,
}

/// Immutable version -> artifact table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTable {
    releases: BTreeMap<String, LibraryRelease>,
}

impl ReleaseTable {
    /// Table shipped with the binary
    pub fn embedded() -> Result<Self, ProvisionError> {
        Self::parse(config::RELEASES_TOML)
    }

    /// Parse a table from TOML (`[[release]]` entries)
    pub fn parse(content: &str) -> Result<Self, ProvisionError> {
        let file: ReleaseFile =
            toml::from_str(content).map_err(|e| ProvisionError::ReleaseTable(e.to_string()))?;

        let mut releases = BTreeMap::new();
        for release in file.release {
            if let Some(previous) = releases.insert(release.version.clone(), release) {
                return Err(ProvisionError::ReleaseTable(format!(
                    "duplicate entry for version {}",
                    previous.version
                )));
            }
        }
        Ok(Self { releases })
    }

    /// Look up a version
    pub fn get(&self, version: &str) -> Option<&LibraryRelease> {
        self.releases.get(version)
    }

    /// Known versions, sorted
    pub fn versions(&self) -> Vec<String> {
        self.releases.keys().cloned().collect()
    }
}

/// Plan the `install-library` action
pub fn plan_install_library(
    env: &EnvSnapshot,
    table: &ReleaseTable,
) -> Result<Plan, ProvisionError> {
    let source = LibrarySource::from_env(env)?.ok_or_else(|| {
        ProvisionError::MissingConfiguration {
            variable: vars::H5_SOURCE.to_string(),
        }
    })?;
    let version = env.require(vars::H5_VERSION)?;
    tracing::info!(%source, version, "planning HDF5 installation");

    let mut plan = Plan::new(format!("Installing HDF5 ({version}, source={source})"));
    match source {
        LibrarySource::Managed => {
            plan.run(CommandLine::new("conda").args(["config", "--set", "always_yes", "yes"]));
            plan.run(CommandLine::new("conda").args(["config", "--set", "changeps1", "no"]));
            plan.run(
                CommandLine::new("conda")
                    .args(["create", "-y", "-n", defaults::CONDA_ENV_NAME])
                    .arg(format!("{}=={version}", defaults::CONDA_PACKAGE))
                    .installer(),
            );
        }
        LibrarySource::Direct => {
            let release = table
                .get(version)
                .ok_or_else(|| ProvisionError::UnsupportedVersion {
                    version: version.to_string(),
                    supported: table.versions(),
                })?;
            plan.download(release.download_url(), defaults::HDF5_ARCHIVE);
            plan.run(CommandLine::new("7z").args(["x", defaults::HDF5_ARCHIVE, "-y"]));
            plan.run(
                CommandLine::new("msiexec")
                    .args(["/i", release.installer.as_str(), "/qn"])
                    .installer(),
            );
        }
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plan::FailureKind;

    fn table() -> ReleaseTable {
        ReleaseTable::embedded().unwrap()
    }

    #[test]
    fn test_embedded_table_has_known_versions() {
        let table = table();
        assert_eq!(table.versions(), vec!["1.10.0".to_string(), "1.8.21".to_string()]);

        let r = table.get("1.8.21").unwrap();
        assert_eq!(r.archive, "hdf5-1.8.21-Std-win7_64-vs14.zip");
        assert_eq!(r.installer, r"hdf\HDF5-1.8.21-win64.msi");

        let r = table.get("1.10.0").unwrap();
        assert_eq!(r.archive, "windows/extra/hdf5-1.10.0-win64-VS2015-shared.zip");
        assert_eq!(r.installer, r"hdf5\HDF5-1.10.0-win64.msi");
    }

    #[test]
    fn test_family() {
        let release = LibraryRelease {
            version: "1.10.0".to_string(),
            archive: "a.zip".to_string(),
            installer: "a.msi".to_string(),
        };
        assert_eq!(release.family(), "1.10");
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let content = r#"
[[release]]
version = "1.0.0"
archive = "a.zip"
installer = "a.msi"

[[release]]
version = "1.0.0"
archive = "b.zip"
installer = "b.msi"
"#;
        assert!(matches!(
            ReleaseTable::parse(content),
            Err(ProvisionError::ReleaseTable(msg)) if msg.contains("1.0.0")
        ));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let content = "[[release]]\nversion = \"1.0.0\"\n";
        assert!(ReleaseTable::parse(content).is_err());
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("conda".parse::<LibrarySource>(), Ok(LibrarySource::Managed));
        assert_eq!("managed".parse::<LibrarySource>(), Ok(LibrarySource::Managed));
        assert_eq!("msi".parse::<LibrarySource>(), Ok(LibrarySource::Direct));
        assert_eq!("Direct".parse::<LibrarySource>(), Ok(LibrarySource::Direct));
        assert_eq!("apt".parse::<LibrarySource>(), Err(()));
    }

    #[test]
    fn test_missing_source() {
        let env = EnvSnapshot::from_pairs([("H5_VERSION", "1.8.21")]);
        assert!(matches!(
            plan_install_library(&env, &table()),
            Err(ProvisionError::MissingConfiguration { variable }) if variable == "H5_SOURCE"
        ));
    }

    #[test]
    fn test_missing_version() {
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "msi")]);
        assert!(matches!(
            plan_install_library(&env, &table()),
            Err(ProvisionError::MissingConfiguration { variable }) if variable == "H5_VERSION"
        ));
    }

    #[test]
    fn test_invalid_source() {
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "apt"), ("H5_VERSION", "1.8.21")]);
        assert!(matches!(
            plan_install_library(&env, &table()),
            Err(ProvisionError::InvalidConfiguration { value, .. }) if value == "apt"
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "direct"), ("H5_VERSION", "1.12.0")]);
        match plan_install_library(&env, &table()) {
            Err(ProvisionError::UnsupportedVersion { version, supported }) => {
                assert_eq!(version, "1.12.0");
                assert_eq!(supported.len(), 2);
            }
            other => panic!("Expected UnsupportedVersion, got: {other:?}"),
        }
    }

    #[test]
    fn test_direct_1_8_21() {
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "direct"), ("H5_VERSION", "1.8.21")]);
        let plan = plan_install_library(&env, &table()).unwrap();

        let downloads: Vec<_> = plan.downloads().collect();
        assert_eq!(downloads.len(), 1);
        let (url, dest) = downloads[0];
        assert_eq!(
            url,
            "https://support.hdfgroup.org/ftp/HDF5/prev-releases/hdf5-1.8/hdf5-1.8.21/bin/hdf5-1.8.21-Std-win7_64-vs14.zip"
        );
        assert!(url.contains("prev-releases/hdf5-1.8/"));
        assert_eq!(dest.to_str(), Some("hdf5.zip"));

        let commands: Vec<String> = plan.commands().map(ToString::to_string).collect();
        assert_eq!(
            commands,
            vec![
                "7z x hdf5.zip -y".to_string(),
                r"msiexec /i hdf\HDF5-1.8.21-win64.msi /qn".to_string(),
            ]
        );
    }

    #[test]
    fn test_direct_1_10_0_url() {
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "msi"), ("H5_VERSION", "1.10.0")]);
        let plan = plan_install_library(&env, &table()).unwrap();
        let (url, _) = plan.downloads().next().unwrap();
        assert_eq!(
            url,
            "https://support.hdfgroup.org/ftp/HDF5/prev-releases/hdf5-1.10/hdf5-1.10.0/bin/windows/extra/hdf5-1.10.0-win64-VS2015-shared.zip"
        );
    }

    #[test]
    fn test_managed_plan_any_version() {
        // conda resolves the version itself, so the table is not consulted
        let env = EnvSnapshot::from_pairs([("H5_SOURCE", "conda"), ("H5_VERSION", "1.12.2")]);
        let plan = plan_install_library(&env, &table()).unwrap();

        assert_eq!(plan.downloads().count(), 0);
        let commands: Vec<_> = plan.commands().collect();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].to_string(), "conda config --set always_yes yes");
        assert_eq!(commands[1].to_string(), "conda config --set changeps1 no");
        assert_eq!(commands[2].to_string(), "conda create -y -n testenv hdf5==1.12.2");
        assert_eq!(commands[2].failure, FailureKind::Install);
    }
}
