//! Tool system: trait, envelope, registry and built-in tools

pub mod base;
pub mod builtin;
pub mod registry;

pub use base::{ContentBlock, ResponseEnvelope, Tool, ToolCall};
pub use builtin::builtin_registry;
pub use registry::{ToolDescriptor, ToolRegistry};
