//! Error types for SetupSuite

use std::path::PathBuf;
use thiserror::Error;

/// Result type for SetupSuite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SetupSuite
///
/// The `.sscfg` parser itself never fails; these errors come from the code
/// around it that reads and writes configuration files.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading or writing a configuration file
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process may not write to the configuration location
    #[error(
        "Permission denied on {} (try running with sudo or pass a different config path)",
        path.display()
    )]
    PermissionDenied { path: PathBuf },

    /// Refusing to overwrite an existing configuration file
    #[error("Configuration file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A JSON or TOML document did not match the configuration schema
    #[error("Invalid configuration in {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// Unknown server role name
    #[error("Unknown server role: {0} (expected one of web, database, docker, proxy, build, basic)")]
    UnknownRole(String),
}

impl Error {
    /// Wrap an IO error, mapping permission failures to [`Error::PermissionDenied`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Error::PermissionDenied { path }
        } else {
            Error::Io { path, source }
        }
    }
}
