//! Download URLs

/// Rust distribution server (MSI installers live directly under this path)
pub const RUST_DIST: &str = "https://static.rust-lang.org/dist";

/// HDF Group archive of previous HDF5 releases
pub const HDF5_PREV_RELEASES: &str = "https://support.hdfgroup.org/ftp/HDF5/prev-releases";
