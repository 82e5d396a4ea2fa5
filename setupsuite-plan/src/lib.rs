//! SetupSuite Setup Steps
//!
//! Steps read a parsed configuration tree and describe what setting up the
//! server would involve. Nothing here touches the system: the output is a
//! [`Plan`] of [`Action`]s plus notes for the operator.
//!
//! ```rust
//! use setupsuite_core::{ConfigTree, InstallToolsBlock};
//! use setupsuite_plan::StepRegistry;
//!
//! let tree = ConfigTree {
//!     install_tools: Some(InstallToolsBlock { tools: vec!["htop".to_string()] }),
//!     ..Default::default()
//! };
//! let plan = StepRegistry::with_defaults().plan(&tree);
//! assert_eq!(plan.actions.len(), 1);
//! ```

mod action;
mod registry;
pub mod steps;
mod traits;

pub use action::{Action, Note, Plan, PlannedAction};
pub use registry::StepRegistry;
pub use traits::{PlanContext, Step, StepInfo};
