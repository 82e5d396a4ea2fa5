//! Step registry

use crate::action::{Note, Plan, PlannedAction};
use crate::steps::{FirewallStep, PackagesStep, RoleStep, SecurityStep};
use crate::traits::{PlanContext, Step, StepInfo};
use setupsuite_core::ConfigTree;
use std::sync::Arc;

/// Ordered step registry
///
/// Steps run in registration order. Registering a step under a name that is
/// already taken replaces the old step in place.
pub struct StepRegistry {
    steps: Vec<Arc<dyn Step>>,
}

impl StepRegistry {
    /// Create an empty step registry
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Registry holding the built-in steps: security, packages, firewall, role
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SecurityStep));
        registry.register(Arc::new(PackagesStep));
        registry.register(Arc::new(FirewallStep));
        registry.register(Arc::new(RoleStep));
        registry
    }

    /// Register a step
    pub fn register(&mut self, step: Arc<dyn Step>) {
        let info = step.info();
        tracing::debug!("Registering step: {}", info.name);

        match self.steps.iter().position(|s| s.info().name == info.name) {
            Some(index) => self.steps[index] = step,
            None => self.steps.push(step),
        }
    }

    /// Get a step by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Step>> {
        self.steps.iter().find(|s| s.info().name == name).cloned()
    }

    /// List all registered steps, in run order
    pub fn list(&self) -> Vec<StepInfo> {
        self.steps.iter().map(|s| s.info()).collect()
    }

    /// Run every step against `config`
    pub fn plan(&self, config: &ConfigTree) -> Plan {
        let mut plan = Plan::default();

        for step in &self.steps {
            let name = step.info().name;
            let mut ctx = PlanContext::new(config);
            let actions = step.plan(&mut ctx);
            tracing::debug!("Step {} planned {} action(s)", name, actions.len());

            plan.actions.extend(actions.into_iter().map(|action| PlannedAction {
                step: name.clone(),
                action,
            }));
            plan.notes.extend(ctx.into_notes().into_iter().map(|message| Note {
                step: name.clone(),
                message,
            }));
        }

        plan
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}
