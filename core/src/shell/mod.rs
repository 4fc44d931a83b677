//! Command executor bridge
//!
//! Translates a tool invocation into one PowerShell subprocess execution and
//! normalizes stdout/stderr/exit status into an [`ExecutionOutcome`].

pub mod quote;
pub mod runner;

pub use quote::escape_double_quotes;
pub use runner::{ExecutionOutcome, ExecutionRequest, PowerShellRunner};
