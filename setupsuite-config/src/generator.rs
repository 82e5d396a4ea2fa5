//! Serializer and default-document generator
//!
//! Converts a [`ConfigTree`] back into `.sscfg` text, the structural inverse of
//! the parser: `parse(&to_sscfg(&tree)) == tree` for trees whose strings hold
//! no line breaks.

use crate::adapter::Format;
use setupsuite_core::config::SSH_KEY_PLACEHOLDER;
use setupsuite_core::{
    ConfigTree, ConfigurationBlock, Error, FirewallBlock, InstallToolsBlock, Result, SecureBlock,
    ServerRole,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One line-level item of a block body
enum Entry {
    Scalar { key: String, value: String },
    Array { key: String, items: Vec<String> },
    Block { name: String, entries: Vec<Entry> },
}

impl Entry {
    fn string(key: &str, value: &str) -> Self {
        Entry::Scalar {
            key: key.to_string(),
            value: quote(value),
        }
    }

    fn integer(key: &str, value: impl ToString) -> Self {
        Entry::Scalar {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Serialize a tree as a canonical `.sscfg` document
pub fn to_sscfg(tree: &ConfigTree) -> String {
    let mut blocks = Vec::new();
    if let Some(secure) = &tree.setup_secure {
        blocks.push(secure_entry(secure));
    }
    if let Some(tools) = &tree.install_tools {
        blocks.push(tools_entry(tools));
    }

    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_entry(&mut out, block, 0, false);
    }
    out
}

fn secure_entry(secure: &SecureBlock) -> Entry {
    let mut entries = vec![
        Entry::string("ssh_user", &secure.ssh_user),
        Entry::string("user_ssh_rsa", &secure.user_ssh_rsa),
        Entry::integer("ssh_port", secure.ssh_port),
    ];
    if let Some(cfg) = &secure.configuration {
        entries.push(configuration_entry(cfg));
    }
    if let Some(fw) = &secure.firewall {
        entries.push(firewall_entry(fw));
    }
    Entry::Block {
        name: "setup_secure".to_string(),
        entries,
    }
}

fn configuration_entry(cfg: &ConfigurationBlock) -> Entry {
    let mut entries = vec![Entry::string("type", &cfg.server_type)];
    if let Some(domain) = &cfg.domain {
        entries.push(Entry::string("domain", domain));
    }
    if let Some(email) = &cfg.email {
        entries.push(Entry::string("email", email));
    }
    for (key, value) in &cfg.options {
        if is_option_key(key) {
            entries.push(Entry::string(key, value));
        } else {
            tracing::warn!("Skipping option '{}': the key cannot be written as .sscfg", key);
        }
    }
    Entry::Block {
        name: "configuration".to_string(),
        entries,
    }
}

/// Whether `key` survives as an option key in a `.configuration` block.
///
/// The key must read back as itself: no surrounding whitespace, no leading
/// `#` or `.`, no structural characters, and not one of the block's own keys.
pub fn is_option_key(key: &str) -> bool {
    !key.is_empty()
        && key == key.trim()
        && !key.starts_with(['#', '.'])
        && !key.contains([':', '"', '{', '}', '[', ']', ',', '\n', '\r'])
        && !matches!(key, "type" | "domain" | "email")
}

fn firewall_entry(fw: &FirewallBlock) -> Entry {
    Entry::Block {
        name: "firewall".to_string(),
        entries: vec![Entry::Array {
            key: "open_ports".to_string(),
            items: fw.open_ports.iter().map(u16::to_string).collect(),
        }],
    }
}

fn tools_entry(tools: &InstallToolsBlock) -> Entry {
    Entry::Block {
        name: "install_tools".to_string(),
        entries: vec![Entry::Array {
            key: "tools".to_string(),
            items: tools.tools.iter().map(|tool| quote(tool)).collect(),
        }],
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Write one entry; `comma` when a sibling follows it.
fn write_entry(out: &mut String, entry: &Entry, depth: usize, comma: bool) {
    let separator = if comma { "," } else { "" };
    indent(out, depth);

    match entry {
        Entry::Scalar { key, value } => {
            out.push_str(&format!("{}: {}{}\n", key, value, separator));
        }
        Entry::Array { key, items } => {
            out.push_str(&format!("{}: [\n", key));
            for (i, item) in items.iter().enumerate() {
                indent(out, depth + 1);
                out.push_str(item);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            indent(out, depth);
            out.push_str(&format!("]{}\n", separator));
        }
        Entry::Block { name, entries } => {
            out.push_str(&format!(".{}{{\n", name));
            for (i, child) in entries.iter().enumerate() {
                write_entry(out, child, depth + 1, i + 1 < entries.len());
            }
            indent(out, depth);
            out.push_str(&format!("}}{}\n", separator));
        }
    }
}

/// The canonical tree a new server of `role` starts from
pub fn default_config(role: ServerRole) -> ConfigTree {
    let (user, ports, tools): (&str, &[u16], &[&str]) = match role {
        ServerRole::Web => (
            "admin",
            &[22022, 80, 443],
            &["nginx", "certbot", "python3-certbot-nginx", "ufw", "htop", "curl", "git"],
        ),
        ServerRole::Database => (
            "dbadmin",
            &[22022, 3306],
            &["mysql-server", "mysql-client", "ufw", "htop", "curl"],
        ),
        ServerRole::Docker => (
            "dockeradmin",
            &[22022, 80, 443, 2376],
            &["docker.io", "docker-compose", "ufw", "htop", "curl", "git"],
        ),
        ServerRole::Proxy => (
            "proxyadmin",
            &[22022, 80, 443],
            &["nginx", "certbot", "python3-certbot-nginx", "ufw", "htop", "curl"],
        ),
        ServerRole::Build => (
            "buildadmin",
            &[22022, 80, 443, 8080],
            &[
                "git",
                "nodejs",
                "npm",
                "python3",
                "python3-pip",
                "build-essential",
                "docker.io",
                "ufw",
                "htop",
                "curl",
            ],
        ),
        ServerRole::Basic => ("admin", &[22022], &["ufw", "htop", "curl", "git", "nano"]),
    };

    let (domain, email) = match role {
        ServerRole::Web => (Some("example.com"), Some("admin@example.com")),
        ServerRole::Proxy => (Some("proxy.example.com"), Some("admin@example.com")),
        _ => (None, None),
    };

    let mut options = BTreeMap::new();
    if role == ServerRole::Database {
        options.insert("db_engine".to_string(), "mysql".to_string());
        options.insert(
            "root_password".to_string(),
            "REPLACE_WITH_SECURE_PASSWORD".to_string(),
        );
    }

    ConfigTree {
        setup_secure: Some(SecureBlock {
            ssh_user: user.to_string(),
            user_ssh_rsa: SSH_KEY_PLACEHOLDER.to_string(),
            ssh_port: 22022,
            configuration: Some(ConfigurationBlock {
                server_type: role.to_string(),
                domain: domain.map(str::to_string),
                email: email.map(str::to_string),
                options,
            }),
            firewall: Some(FirewallBlock {
                open_ports: ports.to_vec(),
            }),
        }),
        install_tools: Some(InstallToolsBlock {
            tools: tools.iter().map(|tool| tool.to_string()).collect(),
        }),
    }
}

/// Default `.sscfg` document for `role`
pub fn generate(role: ServerRole) -> String {
    format!(
        "# SetupSuite configuration ({} server)\n# Replace the placeholder values before running setupsuite.\n\n{}",
        role,
        to_sscfg(&default_config(role))
    )
}

/// Write the default document for `role` to `path`, creating parent directories.
///
/// The document is rendered in the format implied by the extension of `path`.
/// An existing file is only replaced when `overwrite` is set.
pub fn create_default_config(role: ServerRole, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let path = path.as_ref();

    if path.exists() && !overwrite {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            tracing::info!("📁 Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
    }

    let contents = match Format::from_path(path) {
        Format::Sscfg => generate(role),
        format => format
            .render(&default_config(role))
            .map_err(|e| Error::Format {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
    };

    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    tracing::info!("📝 Wrote default {} config to {}", role, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_with_diagnostics};

    #[test]
    fn test_generated_documents_parse_back() {
        for role in ServerRole::ALL {
            let parsed = parse_with_diagnostics(&generate(role));
            assert!(!parsed.has_diagnostics(), "{}: {:?}", role, parsed.diagnostics);

            let secure = parsed.tree.setup_secure.as_ref().unwrap();
            assert!(!secure.ssh_user.is_empty());
            assert_eq!(parsed.tree.configuration().unwrap().server_type, role.as_str());
            assert_eq!(parsed.tree, default_config(role));
        }
    }

    #[test]
    fn test_web_document_layout() {
        let expected = r#".setup_secure{
	ssh_user: "admin",
	user_ssh_rsa: "REPLACE_WITH_YOUR_SSH_KEY",
	ssh_port: 22022,
	.configuration{
		type: "web",
		domain: "example.com",
		email: "admin@example.com"
	},
	.firewall{
		open_ports: [
			22022,
			80,
			443
		]
	}
}

.install_tools{
	tools: [
		"nginx",
		"certbot",
		"python3-certbot-nginx",
		"ufw",
		"htop",
		"curl",
		"git"
	]
}
"#;
        assert_eq!(to_sscfg(&default_config(ServerRole::Web)), expected);
    }

    #[test]
    fn test_database_defaults_carry_engine_options() {
        let tree = parse(&generate(ServerRole::Database));
        let db = tree.configuration().unwrap().database();
        assert_eq!(db.engine.service_name(), "mysql");
        assert_eq!(db.root_password.as_deref(), Some("REPLACE_WITH_SECURE_PASSWORD"));
    }

    #[test]
    fn test_round_trip_preserves_tree() {
        let mut options = BTreeMap::new();
        options.insert("upstream".to_string(), "http://10.0.0.2:3000".to_string());
        options.insert("note".to_string(), "trailing comma,".to_string());

        let tree = ConfigTree {
            setup_secure: Some(SecureBlock {
                ssh_user: "ops".to_string(),
                user_ssh_rsa: String::new(),
                ssh_port: 0,
                configuration: Some(ConfigurationBlock {
                    server_type: "proxy".to_string(),
                    domain: None,
                    email: Some("ops@example.com".to_string()),
                    options,
                }),
                firewall: Some(FirewallBlock {
                    open_ports: vec![443, 443, 80],
                }),
            }),
            install_tools: Some(InstallToolsBlock { tools: vec![] }),
        };

        assert_eq!(parse(&to_sscfg(&tree)), tree);
    }

    #[test]
    fn test_option_keys_that_cannot_round_trip_are_skipped() {
        let mut options = BTreeMap::new();
        for key in ["#note", ".dot", "a:b", " padded", "type", "q\"uote", "registry"] {
            options.insert(key.to_string(), "x".to_string());
        }
        let tree = ConfigTree {
            setup_secure: Some(SecureBlock {
                ssh_user: "ops".to_string(),
                ssh_port: 2222,
                configuration: Some(ConfigurationBlock {
                    server_type: "docker".to_string(),
                    options,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            install_tools: None,
        };

        let text = to_sscfg(&tree);
        assert!(!text.contains("#note"));
        assert!(!text.contains("a:b"));

        let parsed = parse_with_diagnostics(&text);
        assert!(!parsed.has_diagnostics(), "{:?}", parsed.diagnostics);
        let cfg = parsed.tree.configuration().unwrap();
        assert_eq!(cfg.server_type, "docker");
        assert_eq!(cfg.options.len(), 1);
        assert_eq!(cfg.option("registry"), Some("x"));
    }

    #[test]
    fn test_is_option_key() {
        assert!(is_option_key("db_engine"));
        assert!(is_option_key("proxy pass"));
        assert!(!is_option_key(""));
        assert!(!is_option_key("#note"));
        assert!(!is_option_key(".dot"));
        assert!(!is_option_key("a:b"));
        assert!(!is_option_key("email"));
        assert!(!is_option_key("line\nbreak"));
    }

    #[test]
    fn test_empty_tree_serializes_to_nothing() {
        assert_eq!(to_sscfg(&ConfigTree::default()), "");
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.sscfg");

        create_default_config(ServerRole::Docker, &path, false).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, generate(ServerRole::Docker));

        let err = create_default_config(ServerRole::Web, &path, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));

        create_default_config(ServerRole::Web, &path, true).unwrap();
        assert_eq!(
            parse(&fs::read_to_string(&path).unwrap())
                .configuration()
                .unwrap()
                .server_type,
            "web"
        );
    }

    #[test]
    fn test_create_default_config_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        create_default_config(ServerRole::Build, &path, false).unwrap();
        let tree = crate::adapter::JsonAdapter::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(tree, default_config(ServerRole::Build));
    }
}
