//! # powershell-mcp
//!
//! Model Context Protocol server exposing PowerShell execution tools over
//! stdio. Requests arrive as line-delimited JSON-RPC on stdin; each request
//! resolves to exactly one response on stdout. Diagnostics go to stderr.

use anyhow::Result;
use clap::Parser;
use powershell_mcp_core::config::{DEFAULT_MAX_OUTPUT, DEFAULT_TIMEOUT_SECS};
use powershell_mcp_core::{builtin_registry, ShellConfig};
use tokio::io::BufReader;

mod server;

use server::McpServer;

/// MCP server for PowerShell command and script execution
#[derive(Parser)]
#[command(name = "powershell-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Model Context Protocol server for PowerShell")]
struct Cli {
    /// PowerShell interpreter to invoke (defaults to pwsh or powershell on PATH)
    #[arg(long, env = "POWERSHELL_MCP_INTERPRETER")]
    interpreter: Option<String>,

    /// Wall-clock limit per invocation, in seconds
    #[arg(long, env = "POWERSHELL_MCP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Cap on captured output per stream, in characters
    #[arg(long, env = "POWERSHELL_MCP_MAX_OUTPUT", default_value_t = DEFAULT_MAX_OUTPUT)]
    max_output: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize tracing on stderr; stdout carries the protocol
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.interpreter {
        Some(program) => ShellConfig::with_program(program.clone()),
        None => ShellConfig::default(),
    };
    config.timeout_secs = cli.timeout;
    config.max_output = cli.max_output;

    tracing::info!(
        interpreter = %config.program,
        timeout_secs = config.timeout_secs,
        "starting PowerShell MCP server"
    );

    // A registration failure here is fatal: exit non-zero before serving.
    let registry = builtin_registry(config)?;

    let server = McpServer::new(registry);
    let stdin = BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await
}
