//! Configuration adapters
//!
//! Besides `.sscfg`, a configuration tree can be read from and written to
//! JSON or TOML through its serde representation.

mod json;
mod toml;

pub use self::json::JsonAdapter;
pub use self::toml::TomlAdapter;

use crate::generator::{is_option_key, to_sscfg};
use setupsuite_core::ConfigTree;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Adapter error
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] ::toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] ::toml::ser::Error),

    #[error("option key '{0}' cannot be written as .sscfg")]
    UnrepresentableKey(String),
}

/// Reject trees whose option keys would not survive a trip through `.sscfg`.
fn check_option_keys(tree: ConfigTree) -> Result<ConfigTree, AdapterError> {
    if let Some(cfg) = tree.configuration() {
        if let Some(key) = cfg.options.keys().find(|key| !is_option_key(key)) {
            return Err(AdapterError::UnrepresentableKey(key.clone()));
        }
    }
    Ok(tree)
}

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Sscfg,
    Json,
    Toml,
}

impl Format {
    /// Format implied by the extension of `path`; `.sscfg` for anything unknown.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Sscfg,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Sscfg => "sscfg",
            Format::Json => "json",
            Format::Toml => "toml",
        }
    }

    /// Serialize `tree` in this format
    pub fn render(&self, tree: &ConfigTree) -> Result<String, AdapterError> {
        match self {
            Format::Sscfg => Ok(to_sscfg(tree)),
            Format::Json => JsonAdapter::serialize(tree),
            Format::Toml => TomlAdapter::serialize(tree),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sscfg" => Ok(Format::Sscfg),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            other => Err(format!("unknown format '{}' (expected sscfg, json or toml)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::default_config;
    use setupsuite_core::ServerRole;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("/etc/setupsuite/config.sscfg")), Format::Sscfg);
        assert_eq!(Format::from_path(Path::new("server.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("server.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("config")), Format::Sscfg);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TOML".parse::<Format>().unwrap(), Format::Toml);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_render_every_format() {
        let tree = default_config(ServerRole::Proxy);
        for format in [Format::Sscfg, Format::Json, Format::Toml] {
            let text = format.render(&tree).unwrap();
            assert!(text.contains("proxyadmin"), "{}: {}", format, text);
        }
    }
}
