//! Infrastructure layer
//!
//! Handles all I/O operations: network, external processes, and the
//! installed-programs registry. This module is the only place where side
//! effects occur.

pub mod download;
pub mod process;
pub mod registry;
