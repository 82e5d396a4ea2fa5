//! Base hardening: admin user, SSH key, sshd port, system update

use crate::action::Action;
use crate::traits::{PlanContext, Step, StepInfo};
use setupsuite_core::config::SSH_KEY_PLACEHOLDER;

/// Sudo group every admin user joins; sshd only admits its members.
pub const SSH_GROUP: &str = "sshuser";

pub struct SecurityStep;

impl Step for SecurityStep {
    fn info(&self) -> StepInfo {
        StepInfo::new("security", "Admin user, SSH hardening and system update")
    }

    fn plan(&self, ctx: &mut PlanContext<'_>) -> Vec<Action> {
        let Some(secure) = ctx.secure() else {
            return Vec::new();
        };
        let mut actions = Vec::new();

        if !secure.ssh_user.is_empty() {
            let user = secure.ssh_user.clone();
            actions.push(Action::CreateUser { user: user.clone() });
            actions.push(Action::AddToGroup {
                user: user.clone(),
                group: SSH_GROUP.to_string(),
            });
            actions.push(Action::GrantSudo { user: user.clone() });

            match secure.user_ssh_rsa.as_str() {
                "" => ctx.note(format!("no SSH key given for {}", user)),
                SSH_KEY_PLACEHOLDER => ctx.note(format!(
                    "user_ssh_rsa is still the placeholder; no key installed for {}",
                    user
                )),
                key => actions.push(Action::InstallSshKey {
                    user,
                    key: key.to_string(),
                }),
            }
        }

        if secure.ssh_port > 0 {
            actions.push(Action::ConfigureSshd {
                port: secure.ssh_port,
            });
        }

        actions.push(Action::ConfigureRootShell);
        actions.push(Action::UpdateSystem);
        actions
    }
}
