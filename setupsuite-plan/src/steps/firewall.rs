//! Firewall rules

use crate::action::Action;
use crate::traits::{PlanContext, Step, StepInfo};

pub struct FirewallStep;

impl Step for FirewallStep {
    fn info(&self) -> StepInfo {
        StepInfo::new("firewall", "Open the ports listed in firewall.open_ports")
    }

    fn plan(&self, ctx: &mut PlanContext<'_>) -> Vec<Action> {
        let Some(secure) = ctx.secure() else {
            return Vec::new();
        };
        let Some(firewall) = secure.firewall.as_ref() else {
            return Vec::new();
        };

        if firewall.open_ports.is_empty() {
            ctx.note("firewall block lists no open ports");
            return Vec::new();
        }
        if secure.ssh_port > 0 && !firewall.open_ports.contains(&secure.ssh_port) {
            ctx.note(format!(
                "ssh_port {} is not in open_ports; SSH will be unreachable",
                secure.ssh_port
            ));
        }

        vec![Action::OpenPorts {
            ports: firewall.open_ports.clone(),
        }]
    }
}
