//! PowerShell subprocess execution

use crate::config::ShellConfig;
use crate::shell::quote::escape_double_quotes;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::time::{timeout, Duration};
use tracing::debug;

/// One subprocess invocation, in one of the two shapes the tools use
#[derive(Debug, Clone)]
pub enum ExecutionRequest {
    /// Command text handed to the interpreter's `-Command` flag.
    /// Goes through double-quote escaping before submission.
    Command(String),

    /// Script file handed to `-File`, with an optional verbatim parameter
    /// string appended after the quoted path.
    Script {
        path: String,
        parameters: Option<String>,
    },
}

/// Normalized result of one subprocess execution.
///
/// Exactly one outcome is produced per request. On failure, `stderr` carries
/// the failure text: the interpreter's stderr verbatim, the launch error's
/// message, or the exit-status/timeout message.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_failure: bool,
}

impl ExecutionOutcome {
    fn failure<S: Into<String>>(message: S) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: message.into(),
            exit_failure: false,
        }
    }
}

/// Executes [`ExecutionRequest`]s against the configured interpreter.
///
/// One OS process is created and destroyed per call; there is no pooling,
/// no retry, and no cancellation once spawned. The wall-clock timeout and
/// output cap come from [`ShellConfig`].
#[derive(Debug, Clone)]
pub struct PowerShellRunner {
    config: ShellConfig,
}

impl PowerShellRunner {
    pub fn new(config: ShellConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Build the full command line submitted to the system shell
    pub fn command_line(&self, request: &ExecutionRequest) -> String {
        match request {
            ExecutionRequest::Command(text) => format!(
                "{} -Command \"{}\"",
                self.config.program,
                escape_double_quotes(text)
            ),
            ExecutionRequest::Script { path, parameters } => match parameters {
                Some(parameters) => {
                    format!("{} -File \"{}\" {}", self.config.program, path, parameters)
                }
                None => format!("{} -File \"{}\"", self.config.program, path),
            },
        }
    }

    /// Run one request to completion and classify the result.
    ///
    /// Classification: non-empty stderr is a failure even when the process
    /// exits 0; a non-zero exit with empty stderr is a failure carrying the
    /// exit status; everything else is success carrying stdout verbatim.
    pub async fn run(&self, request: ExecutionRequest) -> ExecutionOutcome {
        let line = self.command_line(&request);
        debug!(command = %line, "spawning PowerShell");

        let mut cmd = system_shell(&line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return ExecutionOutcome::failure(e.to_string()),
        };

        let limit = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(limit, capture_output(&mut child)).await;

        match result {
            Ok(Ok((status, stdout, stderr))) => {
                let stdout = truncate_output(&stdout, self.config.max_output);
                let stderr = truncate_output(&stderr, self.config.max_output);

                if !stderr.is_empty() {
                    ExecutionOutcome {
                        succeeded: false,
                        stdout,
                        stderr,
                        exit_failure: false,
                    }
                } else if !status.success() {
                    ExecutionOutcome {
                        succeeded: false,
                        stdout,
                        stderr: format!(
                            "PowerShell exited with status {}",
                            status.code().unwrap_or(-1)
                        ),
                        exit_failure: true,
                    }
                } else {
                    ExecutionOutcome {
                        succeeded: true,
                        stdout,
                        stderr,
                        exit_failure: false,
                    }
                }
            }
            Ok(Err(e)) => ExecutionOutcome::failure(e.to_string()),
            Err(_) => {
                let _ = child.kill().await;
                ExecutionOutcome::failure(format!(
                    "PowerShell command timed out after {} seconds",
                    limit.as_secs()
                ))
            }
        }
    }
}

/// Build the system shell invocation for a full command line
#[cfg(unix)]
fn system_shell(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn system_shell(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}

/// Drain stdout and stderr to completion, then wait for the exit status
async fn capture_output(
    child: &mut Child,
) -> std::io::Result<(std::process::ExitStatus, String, String)> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    let mut stdout_reader = BufReader::new(stdout);
    let mut stderr_reader = BufReader::new(stderr);
    let mut stdout_lines = Vec::new();
    let mut stderr_lines = Vec::new();

    let stdout_task = async {
        let mut line = String::new();
        while stdout_reader.read_line(&mut line).await? > 0 {
            stdout_lines.push(line.clone());
            line.clear();
        }
        Ok::<(), std::io::Error>(())
    };

    let stderr_task = async {
        let mut line = String::new();
        while stderr_reader.read_line(&mut line).await? > 0 {
            stderr_lines.push(line.clone());
            line.clear();
        }
        Ok::<(), std::io::Error>(())
    };

    let (stdout_result, stderr_result) = tokio::join!(stdout_task, stderr_task);
    stdout_result?;
    stderr_result?;

    let status = child.wait().await?;

    Ok((status, stdout_lines.join(""), stderr_lines.join("")))
}

/// Cap output at `limit` characters, appending a marker when cut
fn truncate_output(output: &str, limit: usize) -> String {
    if output.len() <= limit {
        return output.to_string();
    }

    let mut end = limit;
    while !output.is_char_boundary(end) {
        end -= 1;
    }

    format!(
        "{}\n<output truncated after {} characters>",
        &output[..end],
        limit
    )
}
