//! Installed-programs registry adapter
//!
//! On Windows, installed programs are listed under
//! `HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall`, one subkey per
//! program with `DisplayName`, `DisplayVersion` and `InstallLocation` values.
//! Other hosts have no such listing and never find anything.

use crate::core::lookup::{InstallLocation, InstalledPackageLookup};

/// [`InstalledPackageLookup`] backed by the Windows registry
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryLookup;

impl RegistryLookup {
    /// Create a registry lookup
    pub fn new() -> Self {
        Self
    }
}

impl InstalledPackageLookup for RegistryLookup {
    fn find(&self, display_name: &str) -> Option<InstallLocation> {
        let entries = installed_programs();
        tracing::debug!("scanned {} installed program(s)", entries.len());
        crate::core::lookup::select_installation(entries, display_name)
    }
}

#[cfg(windows)]
fn installed_programs() -> Vec<InstallLocation> {
    use std::path::PathBuf;
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    use crate::config::defaults::UNINSTALL_KEY;

    let root = match RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey(UNINSTALL_KEY) {
        Ok(root) => root,
        Err(e) => {
            tracing::warn!("cannot open HKLM\\{UNINSTALL_KEY}: {e}");
            return Vec::new();
        }
    };

    root.enum_keys()
        .filter_map(Result::ok)
        .filter_map(|name| root.open_subkey(&name).ok())
        .filter_map(|key| {
            let display_name: String = key.get_value("DisplayName").ok()?;
            let location: String = key.get_value("InstallLocation").ok()?;
            if location.is_empty() {
                return None;
            }
            let display_version: Option<String> = key.get_value("DisplayVersion").ok();
            Some(InstallLocation {
                display_name,
                display_version,
                path: PathBuf::from(location),
            })
        })
        .collect()
}

#[cfg(not(windows))]
fn installed_programs() -> Vec<InstallLocation> {
    tracing::warn!("installed-programs registry is only available on Windows");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_non_windows_finds_nothing() {
        assert!(RegistryLookup::new().find("HDF5").is_none());
    }

    #[cfg(windows)]
    #[test]
    fn test_lookup_does_not_fail_on_unknown_name() {
        assert!(RegistryLookup::new()
            .find("hdf5-ci test entry that is never installed")
            .is_none());
    }
}
