//! Interpreter configuration

/// Default wall-clock limit for a single PowerShell invocation, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default cap on captured output per stream, in characters.
pub const DEFAULT_MAX_OUTPUT: usize = 16000;

/// Configuration for the PowerShell interpreter invocation.
///
/// Built once at startup and shared immutably by all tools. The interpreter
/// program defaults to whichever of `pwsh` / `powershell` is on PATH.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Interpreter executable name or path
    pub program: String,

    /// Wall-clock limit per invocation, in seconds
    pub timeout_secs: u64,

    /// Cap on captured stdout/stderr, in characters per stream
    pub max_output: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_interpreter(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }
}

impl ShellConfig {
    /// Create a config with an explicit interpreter program
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }
}

/// Resolve the PowerShell interpreter on PATH.
///
/// Prefers `pwsh` (PowerShell 7+, cross-platform) over the Windows-only
/// `powershell`. Falls back to `pwsh` when neither is found so that the
/// launch failure surfaces per call rather than at startup.
pub fn default_interpreter() -> String {
    for candidate in ["pwsh", "powershell"] {
        if which::which(candidate).is_ok() {
            return candidate.to_string();
        }
    }
    "pwsh".to_string()
}
