//! SetupSuite Core Library
//!
//! This crate provides the types shared by the SetupSuite crates: the typed
//! configuration tree produced by the `.sscfg` parser, server roles with their
//! role-specific settings, caller-side validation and error handling.

pub mod config;
pub mod error;

pub use config::{
    ConfigTree, ConfigurationBlock, FirewallBlock, InstallToolsBlock, SecureBlock, ServerRole,
};
pub use error::{Error, Result};

/// SetupSuite version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
