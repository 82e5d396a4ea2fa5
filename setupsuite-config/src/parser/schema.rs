//! Block schema
//!
//! Which blocks exist, where they may nest, and which keys each one reads.

use crate::parser::diagnostic::Diagnostic;
use crate::parser::field::Field;
use crate::parser::parser::Parser;
use crate::parser::registry::{BlockBody, BlockRegistry};
use setupsuite_core::{
    ConfigTree, ConfigurationBlock, FirewallBlock, InstallToolsBlock, SecureBlock,
};

/// Top-level blocks understood by [`Parser::new`]
pub fn top_level_blocks() -> BlockRegistry<ConfigTree> {
    BlockRegistry::new()
        .with("setup_secure", setup_secure)
        .with("install_tools", install_tools)
}

fn setup_secure(parser: &mut Parser<'_>, tree: &mut ConfigTree) {
    parser.parse_into(&mut tree.setup_secure);
}

fn install_tools(parser: &mut Parser<'_>, tree: &mut ConfigTree) {
    parser.parse_into(&mut tree.install_tools);
}

fn configuration(parser: &mut Parser<'_>, secure: &mut SecureBlock) {
    parser.parse_into(&mut secure.configuration);
}

fn firewall(parser: &mut Parser<'_>, secure: &mut SecureBlock) {
    parser.parse_into(&mut secure.firewall);
}

impl BlockBody for SecureBlock {
    fn nested() -> BlockRegistry<Self> {
        BlockRegistry::new()
            .with("configuration", configuration)
            .with("firewall", firewall)
    }

    fn assign(&mut self, field: Field<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match field.key {
            "ssh_user" => {
                if let Some(user) = field.string(diagnostics) {
                    self.ssh_user = user;
                }
            }
            "user_ssh_rsa" => {
                if let Some(key) = field.string(diagnostics) {
                    self.user_ssh_rsa = key;
                }
            }
            "ssh_port" => {
                if let Some(port) = field.integer(diagnostics) {
                    self.ssh_port = port;
                }
            }
            _ => field.unknown("setup_secure", diagnostics),
        }
    }
}

impl BlockBody for ConfigurationBlock {
    fn assign(&mut self, field: Field<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match field.key {
            "type" => {
                if let Some(server_type) = field.string(diagnostics) {
                    self.server_type = server_type;
                }
            }
            "domain" => self.domain = field.string(diagnostics),
            "email" => self.email = field.string(diagnostics),
            key => {
                self.options.insert(key.to_string(), field.joined());
            }
        }
    }
}

impl BlockBody for FirewallBlock {
    fn assign(&mut self, field: Field<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match field.key {
            "open_ports" => self.open_ports = field.integers(diagnostics),
            _ => field.unknown("firewall", diagnostics),
        }
    }
}

impl BlockBody for InstallToolsBlock {
    fn assign(&mut self, field: Field<'_>, diagnostics: &mut Vec<Diagnostic>) {
        match field.key {
            "tools" => self.tools = field.strings(),
            _ => field.unknown("install_tools", diagnostics),
        }
    }
}
