//! Package installation

use crate::action::Action;
use crate::traits::{PlanContext, Step, StepInfo};

pub struct PackagesStep;

impl Step for PackagesStep {
    fn info(&self) -> StepInfo {
        StepInfo::new("packages", "Install the tools listed in install_tools")
    }

    fn plan(&self, ctx: &mut PlanContext<'_>) -> Vec<Action> {
        let Some(block) = ctx.config().install_tools.as_ref() else {
            return Vec::new();
        };

        if block.tools.is_empty() {
            ctx.note("install_tools lists no packages");
            return Vec::new();
        }

        vec![Action::InstallPackages {
            packages: block.tools.clone(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setupsuite_core::{ConfigTree, InstallToolsBlock};

    #[test]
    fn test_tools_in_order() {
        let tree = ConfigTree {
            install_tools: Some(InstallToolsBlock {
                tools: vec!["nginx".to_string(), "git".to_string(), "nginx".to_string()],
            }),
            ..Default::default()
        };
        let mut ctx = PlanContext::new(&tree);
        assert_eq!(
            PackagesStep.plan(&mut ctx),
            vec![Action::InstallPackages {
                packages: vec!["nginx".to_string(), "git".to_string(), "nginx".to_string()]
            }]
        );
    }

    #[test]
    fn test_empty_tool_list_leaves_a_note() {
        let tree = ConfigTree {
            install_tools: Some(InstallToolsBlock::default()),
            ..Default::default()
        };
        let mut ctx = PlanContext::new(&tree);
        assert!(PackagesStep.plan(&mut ctx).is_empty());
        assert_eq!(ctx.into_notes().len(), 1);
    }
}
