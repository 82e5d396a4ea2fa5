//! Configuration type definitions
//!
//! These types represent a parsed `.sscfg` document. Every field has a zero
//! value so that a partially written document still yields a usable tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder written into generated documents in place of a real key.
pub const SSH_KEY_PLACEHOLDER: &str = "REPLACE_WITH_YOUR_SSH_KEY";

/// Root of a parsed document: one optional payload per known top-level block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTree {
    /// `.setup_secure{ ... }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_secure: Option<SecureBlock>,

    /// `.install_tools{ ... }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_tools: Option<InstallToolsBlock>,
}

impl ConfigTree {
    /// True when no known block was found.
    pub fn is_empty(&self) -> bool {
        self.setup_secure.is_none() && self.install_tools.is_none()
    }

    /// The `configuration` block, if both it and `setup_secure` are present.
    pub fn configuration(&self) -> Option<&ConfigurationBlock> {
        self.setup_secure.as_ref()?.configuration.as_ref()
    }

    /// Ports listed in the firewall block, or an empty slice.
    pub fn open_ports(&self) -> &[u16] {
        self.setup_secure
            .as_ref()
            .and_then(|s| s.firewall.as_ref())
            .map(|f| f.open_ports.as_slice())
            .unwrap_or(&[])
    }

    /// Tools listed in the install block, or an empty slice.
    pub fn tools(&self) -> &[String] {
        self.install_tools
            .as_ref()
            .map(|t| t.tools.as_slice())
            .unwrap_or(&[])
    }
}

/// Security and access setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureBlock {
    /// Administrative login to create
    #[serde(default)]
    pub ssh_user: String,

    /// Public key installed for `ssh_user`
    #[serde(default)]
    pub user_ssh_rsa: String,

    /// Port sshd should listen on (0 = unset)
    #[serde(default)]
    pub ssh_port: u16,

    /// `.configuration{ ... }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigurationBlock>,

    /// `.firewall{ ... }`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<FirewallBlock>,
}

/// Server role plus role-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationBlock {
    /// Role name, see [`super::ServerRole`]
    #[serde(rename = "type", default)]
    pub server_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Every key that is not `type`, `domain` or `email`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ConfigurationBlock {
    /// Look up a free-form option.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Firewall rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallBlock {
    /// TCP ports to open, in source order
    #[serde(default)]
    pub open_ports: Vec<u16>,
}

/// Packages to install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallToolsBlock {
    /// Package names, in source order
    #[serde(default)]
    pub tools: Vec<String>,
}
