//! Agent definitions rendered into `agents/<role>.md`.
//!
//! Each role carries static metadata (description, mode, color, permission
//! policy) from [`registry`]. The resolved model and any user customisation
//! are folded in to produce an [`AgentDefinition`], which renders to template
//! variables for the agent frontmatter.

pub mod definition;
pub mod permission;
pub mod registry;

pub use definition::{AgentCustomization, AgentDefinition, AgentMode};
pub use permission::{AgentPermission, Permission};
pub use registry::{meta, AgentMeta};
