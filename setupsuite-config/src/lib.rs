//! SetupSuite Configuration Parser
//!
//! This crate reads and writes `.sscfg` documents, the brace-delimited format
//! SetupSuite uses to describe a server: who may log in, which role it plays,
//! which ports are open and which packages get installed.
//!
//! # Example
//!
//! ```rust
//! use setupsuite_config::parse;
//!
//! let source = r#"
//! .setup_secure{
//!     ssh_user: "admin",
//!     ssh_port: 22022,
//!     .firewall{
//!         open_ports: [
//!             22022,
//!             443
//!         ]
//!     }
//! }
//! "#;
//!
//! let tree = parse(source);
//! assert_eq!(tree.open_ports(), [22022, 443]);
//! ```
//!
//! Parsing never fails. Anything the parser had to skip or could not convert
//! is reported through [`parse_with_diagnostics`].

pub mod adapter;
pub mod generator;
pub mod parser;

pub use adapter::{AdapterError, Format, JsonAdapter, TomlAdapter};
pub use generator::{create_default_config, default_config, generate, to_sscfg};
pub use parser::{
    classify, normalize, parse, parse_with_diagnostics, BlockBody, BlockRegistry, Diagnostic,
    DiagnosticKind, Line, LineKind, Location, Parsed, Parser,
};

use setupsuite_core::{Error, Result, ServerRole};
use std::fs;
use std::path::{Path, PathBuf};

/// Where SetupSuite looks for its configuration when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/setupsuite/config.sscfg";

/// A configuration file loaded from disk
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub format: Format,
    /// File contents, kept for rendering diagnostics
    pub source: String,
    pub parsed: Parsed,
}

/// Outcome of [`read_config`]
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file existed and was parsed
    Loaded(Document),
    /// The file was missing; a default `basic` document was written there
    Created(PathBuf),
}

/// Load a configuration file.
///
/// `.json` and `.toml` files go through the serde adapters; everything else
/// is parsed as `.sscfg`, in which case problems in the document show up as
/// diagnostics rather than errors.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let format = Format::from_path(path);

    let parsed = match format {
        Format::Sscfg => parse_with_diagnostics(&source),
        Format::Json => Parsed {
            tree: JsonAdapter::parse(&source).map_err(|e| format_error(path, e))?,
            diagnostics: Vec::new(),
        },
        Format::Toml => Parsed {
            tree: TomlAdapter::parse(&source).map_err(|e| format_error(path, e))?,
            diagnostics: Vec::new(),
        },
    };

    tracing::info!("📄 Loaded {} config from {}", format, path.display());
    for diagnostic in &parsed.diagnostics {
        tracing::warn!("⚠️ {}: {}", path.display(), diagnostic);
    }

    Ok(Document {
        path: path.to_path_buf(),
        format,
        source,
        parsed,
    })
}

/// Read the configuration at `path` (or [`DEFAULT_CONFIG_PATH`]).
///
/// A missing file is not an error: the default `basic` document is written in
/// its place so the operator has something to edit.
pub fn read_config(path: Option<&Path>) -> Result<ReadOutcome> {
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);

    if !path.exists() {
        tracing::warn!("Config file not found: {}", path.display());
        create_default_config(ServerRole::Basic, &path, false)?;
        return Ok(ReadOutcome::Created(path));
    }

    load_file(&path).map(ReadOutcome::Loaded)
}

fn format_error(path: &Path, err: AdapterError) -> Error {
    Error::Format {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_sscfg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.sscfg");
        fs::write(&path, ".setup_secure{\nssh_user: ops\nssh_port: nope\n}\n").unwrap();

        let doc = load_file(&path).unwrap();
        assert_eq!(doc.format, Format::Sscfg);
        assert_eq!(doc.parsed.tree.setup_secure.as_ref().unwrap().ssh_user, "ops");
        assert_eq!(doc.parsed.diagnostics.len(), 1);
        assert_eq!(doc.parsed.diagnostics[0].kind, DiagnosticKind::InvalidInteger);
        assert!(doc.source.contains("nope"));
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let tree = default_config(ServerRole::Web);

        let json = dir.path().join("server.json");
        fs::write(&json, JsonAdapter::serialize(&tree).unwrap()).unwrap();
        assert_eq!(load_file(&json).unwrap().parsed.tree, tree);

        let toml = dir.path().join("server.toml");
        fs::write(&toml, TomlAdapter::serialize(&tree).unwrap()).unwrap();
        assert_eq!(load_file(&toml).unwrap().parsed.tree, tree);
    }

    #[test]
    fn test_load_bad_json_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_file(&path), Err(Error::Format { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/definitely/not/here.sscfg").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_config_creates_then_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etc").join("config.sscfg");

        match read_config(Some(&path)).unwrap() {
            ReadOutcome::Created(created) => assert_eq!(created, path),
            other => panic!("expected a new file, got {:?}", other),
        }

        match read_config(Some(&path)).unwrap() {
            ReadOutcome::Loaded(doc) => {
                assert_eq!(doc.parsed.tree, default_config(ServerRole::Basic));
                assert!(!doc.parsed.has_diagnostics());
            }
            other => panic!("expected a loaded file, got {:?}", other),
        }
    }
}
