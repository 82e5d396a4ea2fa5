//! Planned actions

use serde::Serialize;
use std::fmt;

/// One thing setting up the server would do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CreateUser { user: String },
    AddToGroup { user: String, group: String },
    GrantSudo { user: String },
    InstallSshKey { user: String, key: String },
    ConfigureSshd { port: u16 },
    ConfigureRootShell,
    UpdateSystem,
    InstallPackages { packages: Vec<String> },
    OpenPorts { ports: Vec<u16> },
    /// Enable the service at boot and start it now
    EnableService { service: String },
    NginxSite { domain: String },
    NginxProxy { upstream: String },
    Certificate { domain: String, email: String },
    SecureDatabase { engine: String },
    DockerDaemon {
        log_driver: String,
        log_max_size: String,
        log_max_file: String,
    },
    InstallNodejs,
    PipInstall { package: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateUser { user } => write!(f, "create user {}", user),
            Action::AddToGroup { user, group } => write!(f, "add {} to group {}", user, group),
            Action::GrantSudo { user } => write!(f, "grant sudo to {}", user),
            Action::InstallSshKey { user, key } => {
                let kind = key.split_whitespace().next().unwrap_or("key");
                write!(f, "install {} SSH key for {}", kind, user)
            }
            Action::ConfigureSshd { port } => write!(f, "configure sshd on port {}", port),
            Action::ConfigureRootShell => write!(f, "configure root shell profile"),
            Action::UpdateSystem => write!(f, "update system packages"),
            Action::InstallPackages { packages } => {
                write!(f, "install packages: {}", packages.join(", "))
            }
            Action::OpenPorts { ports } => {
                let ports: Vec<String> = ports.iter().map(u16::to_string).collect();
                write!(f, "open firewall ports: {}", ports.join(", "))
            }
            Action::EnableService { service } => write!(f, "enable and start {}", service),
            Action::NginxSite { domain } => write!(f, "configure nginx site for {}", domain),
            Action::NginxProxy { upstream } => {
                write!(f, "configure nginx reverse proxy to {}", upstream)
            }
            Action::Certificate { domain, email } => {
                write!(f, "request TLS certificate for {} ({})", domain, email)
            }
            Action::SecureDatabase { engine } => write!(f, "secure {} installation", engine),
            Action::DockerDaemon {
                log_driver,
                log_max_size,
                log_max_file,
            } => write!(
                f,
                "configure docker daemon logging ({}, max-size {}, max-file {})",
                log_driver, log_max_size, log_max_file
            ),
            Action::InstallNodejs => write!(f, "install Node.js LTS"),
            Action::PipInstall { package } => write!(f, "pip install {}", package),
        }
    }
}

/// An action together with the step that planned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAction {
    pub step: String,
    #[serde(flatten)]
    pub action: Action,
}

/// A message a step left for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub step: String,
    pub message: String,
}

/// Output of [`crate::StepRegistry::plan`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub actions: Vec<PlannedAction>,
    pub notes: Vec<Note>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.notes.is_empty()
    }

    /// Actions planned by `step`, in order
    pub fn step_actions<'a>(&'a self, step: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions
            .iter()
            .filter(move |planned| planned.step == step)
            .map(|planned| &planned.action)
    }
}
