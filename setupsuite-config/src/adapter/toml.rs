//! TOML configuration adapter

use super::{check_option_keys, AdapterError};
use setupsuite_core::ConfigTree;

/// TOML configuration adapter
pub struct TomlAdapter;

impl TomlAdapter {
    pub fn parse(input: &str) -> Result<ConfigTree, AdapterError> {
        check_option_keys(toml::from_str(input)?)
    }

    pub fn serialize(config: &ConfigTree) -> Result<String, AdapterError> {
        Ok(toml::to_string_pretty(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::default_config;
    use setupsuite_core::ServerRole;

    #[test]
    fn test_toml_round_trip() {
        for role in ServerRole::ALL {
            let tree = default_config(role);
            let text = TomlAdapter::serialize(&tree).unwrap();
            assert_eq!(TomlAdapter::parse(&text).unwrap(), tree, "{}", text);
        }
    }

    #[test]
    fn test_toml_document() {
        let tree = TomlAdapter::parse(
            r#"
[setup_secure]
ssh_user = "ops"
ssh_port = 2222

[setup_secure.configuration]
type = "docker"

[setup_secure.configuration.options]
registry = "ghcr.io"
"#,
        )
        .unwrap();
        let cfg = tree.configuration().unwrap();
        assert_eq!(cfg.server_type, "docker");
        assert_eq!(cfg.option("registry"), Some("ghcr.io"));
        assert_eq!(tree.setup_secure.unwrap().ssh_port, 2222);
    }

    #[test]
    fn test_toml_rejects_unwritable_option_key() {
        let err = TomlAdapter::parse(
            r##"
[setup_secure.configuration.options]
"#note" = "x"
"##,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "option key '#note' cannot be written as .sscfg");
    }
}
