//! hdf5-ci - CI provisioning helper for HDF5 bindings
//!
//! Installs a Rust toolchain and the native HDF5 library on a Windows build
//! agent, then builds and tests the workspace with HDF5 on the search path.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Planning logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (network, processes, registry)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
