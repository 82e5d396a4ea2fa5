//! Configuration model
//!
//! The typed tree a `.sscfg` document parses into, plus the views and checks
//! that consumers of that tree share.

mod role;
mod types;
mod validate;

pub use role::{DatabaseEngine, DatabaseSettings, DockerSettings, ProxySettings, ServerRole};
pub use types::*;
pub use validate::{Severity, ValidationIssue};
