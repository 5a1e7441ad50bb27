//! Process environment modelling
//!
//! The environment is captured once into an immutable [`EnvSnapshot`].
//! Handlers never touch the global process environment; they describe their
//! changes as an [`EnvDelta`] which is applied when child processes start.

use std::collections::BTreeMap;

use crate::config::{defaults::SEARCH_PATH_SEPARATOR, vars};
use crate::error::ProvisionError;

/// Immutable copy of the process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    /// On Windows names are upper-cased, since lookups there are
    /// case-insensitive (`Path` and `PATH` are the same variable).
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| {
                let key = key.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((normalize_key(key), value))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a variable, treating an empty value as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Get a required variable
    pub fn require(&self, key: &str) -> Result<&str, ProvisionError> {
        self.get(key)
            .ok_or_else(|| ProvisionError::MissingConfiguration {
                variable: key.to_string(),
            })
    }

    /// Check whether a variable is set to a non-empty value
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All captured variables
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

#[cfg(windows)]
fn normalize_key(key: String) -> String {
    key.to_ascii_uppercase()
}

#[cfg(not(windows))]
fn normalize_key(key: String) -> String {
    key
}

/// Changes one handler makes to the environment of its child processes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDelta {
    /// Variables added or overridden
    set: BTreeMap<String, String>,
    /// Search path entries, in the order they were prepended
    path_prepends: Vec<String>,
}

impl EnvDelta {
    /// Create an empty delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override a variable
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.set.insert(key.to_string(), value.into());
    }

    /// Prepend a directory to the search path.
    ///
    /// Each call puts the directory in front of all earlier prepends.
    pub fn prepend_path(&mut self, dir: impl Into<String>) {
        self.path_prepends.push(dir.into());
    }

    /// Variables added or overridden
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.set
    }

    /// Search path prepends, in prepend order
    pub fn path_prepends(&self) -> &[String] {
        &self.path_prepends
    }

    /// True when the delta changes nothing
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.path_prepends.is_empty()
    }

    /// Compute the search path that results from applying the prepends to `base`.
    ///
    /// Returns `None` when there is nothing to prepend.
    pub fn search_path(&self, base: Option<&str>) -> Option<String> {
        if self.path_prepends.is_empty() {
            return None;
        }
        let mut entries: Vec<&str> = self.path_prepends.iter().rev().map(String::as_str).collect();
        if let Some(base) = base.filter(|b| !b.is_empty()) {
            entries.push(base);
        }
        let separator = SEARCH_PATH_SEPARATOR.to_string();
        Some(entries.join(separator.as_str()))
    }

    /// Variables a child process needs on top of the inherited environment
    pub fn overrides(&self, snapshot: &EnvSnapshot) -> BTreeMap<String, String> {
        let mut out = self.set.clone();
        if let Some(path) = self.search_path(snapshot.get(vars::PATH)) {
            out.insert(vars::PATH.to_string(), path);
        }
        out
    }

    /// Full environment after applying this delta to `snapshot`
    pub fn apply(&self, snapshot: &EnvSnapshot) -> EnvSnapshot {
        let mut applied = snapshot.vars.clone();
        applied.extend(self.overrides(snapshot));
        EnvSnapshot { vars: applied }
    }
}
