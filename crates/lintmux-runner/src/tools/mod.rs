//! The analyzer contract and the static tool registry.

pub mod registry;
pub mod tool;

pub use registry::{ToolFactory, ToolRegistry};
pub use tool::Tool;
