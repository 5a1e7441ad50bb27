//! Installed-program lookup
//!
//! The host's list of installed programs is reached through
//! [`InstalledPackageLookup`]. The Windows registry adapter lives in
//! [`crate::infra::registry`]; [`StaticLookup`] serves fixed entries.

use std::path::PathBuf;

use semver::Version;

/// One entry of the installed-programs listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLocation {
    /// `DisplayName` of the program
    pub display_name: String,
    /// `DisplayVersion`, when the entry has one
    pub display_version: Option<String>,
    /// `InstallLocation` directory
    pub path: PathBuf,
}

impl InstallLocation {
    /// Create an entry without a version
    pub fn new(display_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            display_version: None,
            path: path.into(),
        }
    }

    /// Attach a display version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.display_version = Some(version.into());
        self
    }

    /// Directory holding the program's executables and DLLs
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join("bin")
    }

    fn parsed_version(&self) -> Option<Version> {
        self.display_version
            .as_deref()
            .and_then(|v| Version::parse(v.trim()).ok())
    }
}

/// Read-only view of the installed-programs listing
pub trait InstalledPackageLookup {
    /// Find the install location of the program whose display name equals `display_name`
    fn find(&self, display_name: &str) -> Option<InstallLocation>;
}

/// Pick the entry to use among all whose display name matches exactly.
///
/// The highest semver `display_version` wins; entries without a parsable
/// version rank below all versioned ones, and among equals the last listed wins.
pub fn select_installation<I>(entries: I, display_name: &str) -> Option<InstallLocation>
where
    I: IntoIterator<Item = InstallLocation>,
{
    let mut matches: Vec<InstallLocation> = entries
        .into_iter()
        .filter(|entry| entry.display_name == display_name)
        .collect();

    if matches.len() > 1 {
        tracing::debug!(
            "found {} installations of {display_name}, selecting the latest",
            matches.len()
        );
    }

    // stable sort keeps listing order among equal versions
    matches.sort_by(|a, b| a.parsed_version().cmp(&b.parsed_version()));
    matches.pop()
}

/// Lookup over a fixed list of entries
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    entries: Vec<InstallLocation>,
}

impl StaticLookup {
    /// Create a lookup over `entries`
    pub fn new(entries: Vec<InstallLocation>) -> Self {
        Self { entries }
    }

    /// Lookup that finds nothing
    pub fn empty() -> Self {
        Self::default()
    }
}

impl InstalledPackageLookup for StaticLookup {
    fn find(&self, display_name: &str) -> Option<InstallLocation> {
        select_installation(self.entries.iter().cloned(), display_name)
    }
}
