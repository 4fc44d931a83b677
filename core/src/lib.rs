//! # powershell-mcp-core
//!
//! Core library for the PowerShell MCP server.
//!
//! Provides the tool registry, the six built-in PowerShell tools, and the
//! command executor bridge that runs the interpreter as a subprocess and
//! normalizes its output into a uniform success/error envelope.

pub mod config;
pub mod error;
pub mod shell;
pub mod tools;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

pub use config::ShellConfig;
pub use error::{Error, Result, ToolError};
pub use shell::{ExecutionOutcome, ExecutionRequest, PowerShellRunner};
pub use tools::{builtin_registry, ResponseEnvelope, Tool, ToolCall, ToolRegistry};

/// Current version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
