//! Configuration and constants
//!
//! Everything here is static: download locations, install directories,
//! environment variable names, and the HDF5 release table.

pub mod defaults;
pub mod urls;
pub mod vars;

/// HDF5 release table shipped with the binary
pub const RELEASES_TOML: &str = include_str!("releases.toml");
