//! Built-in PowerShell tools

pub mod execute;
pub mod find;
pub mod help;
pub mod modules;
pub mod script;
pub mod system_info;

pub use execute::ExecutePsTool;
pub use find::FindCommandsTool;
pub use help::GetCommandHelpTool;
pub use modules::ListModulesTool;
pub use script::RunScriptTool;
pub use system_info::GetSystemInfoTool;

use crate::config::ShellConfig;
use crate::error::Result;
use crate::shell::PowerShellRunner;
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Build a registry holding the six built-in tools.
///
/// All tools share one runner over the given interpreter configuration.
/// A registration failure here is fatal at startup.
pub fn builtin_registry(config: ShellConfig) -> Result<ToolRegistry> {
    let runner = Arc::new(PowerShellRunner::new(config));
    let mut registry = ToolRegistry::new();

    registry.register(Box::new(ExecutePsTool::new(runner.clone())))?;
    registry.register(Box::new(GetSystemInfoTool::new(runner.clone())))?;
    registry.register(Box::new(ListModulesTool::new(runner.clone())))?;
    registry.register(Box::new(GetCommandHelpTool::new(runner.clone())))?;
    registry.register(Box::new(FindCommandsTool::new(runner.clone())))?;
    registry.register(Box::new(RunScriptTool::new(runner)))?;

    Ok(registry)
}
