//! Environment variable names
//!
//! Inputs are read from the snapshot taken at startup; outputs are only ever
//! passed to child processes.

/// Rust release channel to install (stable, beta, nightly)
pub const CHANNEL: &str = "CHANNEL";

/// HDF5 version to install
pub const H5_VERSION: &str = "H5_VERSION";

/// HDF5 installation source (conda or msi)
pub const H5_SOURCE: &str = "H5_SOURCE";

/// Root of the conda installation
pub const CONDA: &str = "CONDA";

/// When non-empty, pin the HDF5 version seen by the build
pub const PIN_VERSION: &str = "PIN_VERSION";

/// Executable search path
pub const PATH: &str = "PATH";

/// HDF5 location hint consumed by the build script
pub const HDF5_DIR: &str = "HDF5_DIR";

/// HDF5 version override consumed by the build script
pub const HDF5_VERSION: &str = "HDF5_VERSION";
