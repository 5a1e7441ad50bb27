//! Default configuration values

/// Host triple of the Rust MSI installer
pub const RUST_HOST_TRIPLE: &str = "x86_64-pc-windows-msvc";

/// Directory the Rust MSI is installed into
pub const RUST_INSTALL_DIR: &str = r"C:\Rust";

/// Local file name for the downloaded HDF5 archive
pub const HDF5_ARCHIVE: &str = "hdf5.zip";

/// Name of the conda environment holding HDF5
pub const CONDA_ENV_NAME: &str = "testenv";

/// Conda package name for HDF5
pub const CONDA_PACKAGE: &str = "hdf5";

/// `DisplayName` of HDF5 in the installed-programs listing
pub const HDF5_DISPLAY_NAME: &str = "HDF5";

/// Registry key listing installed programs (under HKLM)
pub const UNINSTALL_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Subdirectories of the conda environment prepended to PATH, in prepend order
pub const CONDA_PATH_SUBDIRS: [&str; 3] = ["Scripts", r"Library\bin", ""];

/// Separator between entries of the search path
#[cfg(windows)]
pub const SEARCH_PATH_SEPARATOR: char = ';';

/// Separator between entries of the search path
#[cfg(not(windows))]
pub const SEARCH_PATH_SEPARATOR: char = ':';

/// HTTP connect timeout (in seconds)
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Overall HTTP request timeout (in seconds)
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 600;
