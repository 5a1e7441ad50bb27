//! Core business logic module
//!
//! This module turns an environment snapshot into a provisioning plan.
//! It has NO I/O operations - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`environment`] - Environment snapshot and child-process deltas
//! - [`plan`] - Steps, outcomes, and sequential plan execution
//! - [`toolchain`] - Rust toolchain installation
//! - [`library`] - HDF5 installation and the release table
//! - [`lookup`] - Installed-program lookup
//! - [`run_tests`] - Build and test run with HDF5 on the search path

pub mod environment;
pub mod library;
pub mod lookup;
pub mod plan;
pub mod toolchain;
