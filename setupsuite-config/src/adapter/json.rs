//! JSON configuration adapter

use super::{check_option_keys, AdapterError};
use setupsuite_core::ConfigTree;

/// JSON configuration adapter
pub struct JsonAdapter;

impl JsonAdapter {
    /// Parse JSON configuration
    pub fn parse(input: &str) -> Result<ConfigTree, AdapterError> {
        check_option_keys(serde_json::from_str(input)?)
    }

    /// Serialize configuration to JSON
    pub fn serialize(config: &ConfigTree) -> Result<String, AdapterError> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::default_config;
    use setupsuite_core::ServerRole;

    #[test]
    fn test_json_round_trip() {
        let tree = default_config(ServerRole::Database);
        let json = JsonAdapter::serialize(&tree).unwrap();
        assert!(json.contains("\"type\": \"database\""));
        assert_eq!(JsonAdapter::parse(&json).unwrap(), tree);
    }

    #[test]
    fn test_json_partial_document() {
        let tree = JsonAdapter::parse(r#"{"install_tools": {"tools": ["git"]}}"#).unwrap();
        assert!(tree.setup_secure.is_none());
        assert_eq!(tree.tools(), ["git"]);
    }

    #[test]
    fn test_json_schema_error() {
        let err = JsonAdapter::parse(r#"{"setup_secure": {"ssh_port": 70000}}"#).unwrap_err();
        assert!(matches!(err, AdapterError::Json(_)));
    }

    #[test]
    fn test_json_rejects_unwritable_option_key() {
        let err = JsonAdapter::parse(
            r#"{"setup_secure": {"configuration": {"options": {"registry": "ghcr.io", "a:b": "z"}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AdapterError::UnrepresentableKey(ref key) if key == "a:b"));
    }
}
