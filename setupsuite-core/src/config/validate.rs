//! Caller-side validation
//!
//! The parser accepts anything; whoever acts on a tree checks it here first.

use super::role::ServerRole;
use super::types::{ConfigTree, SSH_KEY_PLACEHOLDER};
use serde::Serialize;
use std::fmt;

/// How serious a validation finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `setup_secure.ssh_port`
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", level, self.field, self.message)
    }
}

impl ConfigTree {
    /// Check the fields a provisioning run depends on.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let Some(secure) = &self.setup_secure else {
            issues.push(ValidationIssue::error(
                "setup_secure",
                "missing .setup_secure{} block",
            ));
            return issues;
        };

        if secure.ssh_user.is_empty() {
            issues.push(ValidationIssue::error(
                "setup_secure.ssh_user",
                "no SSH user configured",
            ));
        }
        if secure.ssh_port == 0 {
            issues.push(ValidationIssue::error(
                "setup_secure.ssh_port",
                "no SSH port configured",
            ));
        }
        if secure.user_ssh_rsa.is_empty() || secure.user_ssh_rsa == SSH_KEY_PLACEHOLDER {
            issues.push(ValidationIssue::warning(
                "setup_secure.user_ssh_rsa",
                "no SSH public key configured; key-based login will not be set up",
            ));
        }

        match &secure.configuration {
            None => issues.push(ValidationIssue::warning(
                "setup_secure.configuration",
                "missing .configuration{} block; no role-specific setup will run",
            )),
            Some(cfg) if cfg.server_type.is_empty() => issues.push(ValidationIssue::error(
                "setup_secure.configuration.type",
                "server type is empty",
            )),
            Some(cfg) if cfg.role().is_none() => issues.push(ValidationIssue::error(
                "setup_secure.configuration.type",
                format!(
                    "unknown server type '{}' (expected one of {})",
                    cfg.server_type,
                    ServerRole::ALL.map(|r| r.as_str()).join(", ")
                ),
            )),
            Some(_) => {}
        }

        match &secure.firewall {
            None => issues.push(ValidationIssue::warning(
                "setup_secure.firewall",
                "missing .firewall{} block; firewall will not be configured",
            )),
            Some(fw) if secure.ssh_port != 0 && !fw.open_ports.contains(&secure.ssh_port) => {
                issues.push(ValidationIssue::warning(
                    "setup_secure.firewall.open_ports",
                    format!(
                        "SSH port {} is not opened; you may lock yourself out",
                        secure.ssh_port
                    ),
                ))
            }
            Some(_) => {}
        }

        if self.tools().is_empty() {
            issues.push(ValidationIssue::warning(
                "install_tools.tools",
                "no tools to install",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigurationBlock, FirewallBlock, InstallToolsBlock, SecureBlock};

    fn complete_tree() -> ConfigTree {
        ConfigTree {
            setup_secure: Some(SecureBlock {
                ssh_user: "admin".to_string(),
                user_ssh_rsa: "ssh-ed25519 AAAAC3 admin@laptop".to_string(),
                ssh_port: 22022,
                configuration: Some(ConfigurationBlock {
                    server_type: "web".to_string(),
                    ..Default::default()
                }),
                firewall: Some(FirewallBlock {
                    open_ports: vec![22022, 80, 443],
                }),
            }),
            install_tools: Some(InstallToolsBlock {
                tools: vec!["nginx".to_string()],
            }),
        }
    }

    #[test]
    fn test_complete_tree_is_clean() {
        assert!(complete_tree().validate().is_empty());
    }

    #[test]
    fn test_empty_tree_fails() {
        let issues = ConfigTree::default().validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].field, "setup_secure");
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let mut tree = complete_tree();
        if let Some(cfg) = tree.setup_secure.as_mut().and_then(|s| s.configuration.as_mut()) {
            cfg.server_type = "mainframe".to_string();
        }
        let issues = tree.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("mainframe"));
    }

    #[test]
    fn test_ssh_port_missing_from_firewall() {
        let mut tree = complete_tree();
        if let Some(fw) = tree.setup_secure.as_mut().and_then(|s| s.firewall.as_mut()) {
            fw.open_ports = vec![80, 443];
        }
        let issues = tree.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].field, "setup_secure.firewall.open_ports");
    }

    #[test]
    fn test_placeholder_key_warns() {
        let mut tree = complete_tree();
        if let Some(secure) = tree.setup_secure.as_mut() {
            secure.user_ssh_rsa = SSH_KEY_PLACEHOLDER.to_string();
            secure.ssh_port = 0;
        }
        let issues = tree.validate();
        assert!(issues.iter().any(|i| i.field == "setup_secure.ssh_port" && i.is_error()));
        assert!(issues.iter().any(|i| i.field == "setup_secure.user_ssh_rsa" && !i.is_error()));
    }
}
