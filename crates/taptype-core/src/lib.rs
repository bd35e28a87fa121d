//! Core domain types for the TapType tag-to-keyboard bridge.
//!
//! This crate defines the vocabulary shared by every other TapType crate:
//! the normalized tag identifier ([`Uid`]), the scan event emitted once per
//! distinct tag presentation ([`ScanEvent`]), and the constants that pin down
//! the reader command interface and the reference timing budgets.
//!
//! Nothing in this crate touches hardware or performs I/O; it is pure data
//! and validation, usable from both async and sync contexts.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
