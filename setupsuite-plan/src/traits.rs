//! Step traits

use crate::action::Action;
use setupsuite_core::{ConfigTree, SecureBlock};

/// Step information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInfo {
    /// Step name, unique within a registry
    pub name: String,
    /// Step description
    pub description: String,
}

impl StepInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// What a step sees while planning: the tree, read-only, and a place for notes
pub struct PlanContext<'a> {
    config: &'a ConfigTree,
    notes: Vec<String>,
}

impl<'a> PlanContext<'a> {
    pub fn new(config: &'a ConfigTree) -> Self {
        Self {
            config,
            notes: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a ConfigTree {
        self.config
    }

    /// Shortcut for the `setup_secure` block
    pub fn secure(&self) -> Option<&'a SecureBlock> {
        self.config.setup_secure.as_ref()
    }

    /// Leave a message for the operator
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn into_notes(self) -> Vec<String> {
        self.notes
    }
}

/// A unit of server setup
pub trait Step: Send + Sync {
    /// Get step information
    fn info(&self) -> StepInfo;

    /// Describe what this step would do for the configuration in `ctx`
    fn plan(&self, ctx: &mut PlanContext<'_>) -> Vec<Action>;
}
