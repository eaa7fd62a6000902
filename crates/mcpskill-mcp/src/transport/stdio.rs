//! STDIO transport for MCP servers
//!
//! Spawns the server as a child process and speaks MCP over its
//! stdin/stdout.
//!
//! Environment policy: the child inherits the full environment of this
//! process and the configured `env` entries are layered on top, replacing
//! inherited variables with the same name. Nothing is removed.

use std::collections::BTreeMap;
use std::process::Stdio;

use async_trait::async_trait;
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::ServiceExt;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::{Transport, TransportType};
use crate::error::{McpSkillError, Result};
use crate::session::{McpClient, McpClientHandler};

/// STDIO transport for child process MCP servers
pub struct StdioTransport {
    server_name: String,
    command: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl StdioTransport {
    pub fn new(
        server_name: String,
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            server_name,
            command,
            args,
            env,
        }
    }

    fn spawn_error(&self, executable: &str, e: std::io::Error) -> McpSkillError {
        let err = if e.kind() == std::io::ErrorKind::NotFound {
            format!(
                "Command not found: {}. Ensure it's installed and in PATH.",
                executable
            )
        } else {
            format!("Failed to spawn process '{}': {}", executable, e)
        };
        error!(server = %self.server_name, "{}", err);
        McpSkillError::Connection(err)
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn connect(&self, handler: McpClientHandler) -> Result<McpClient> {
        let (executable, args) = parse_command(&self.command, &self.args)?;

        info!(
            server = %self.server_name,
            executable = %executable,
            args = ?args,
            env_overrides = self.env.len(),
            "Connecting to STDIO server"
        );

        let env = self.env.clone();
        let transport = TokioChildProcess::new(Command::new(&executable).configure(move |cmd| {
            cmd.args(&args)
                .envs(&env)
                .stderr(Stdio::inherit())
                .kill_on_drop(true);
            configure_child_process_platform(cmd);
        }))
        .map_err(|e| self.spawn_error(&executable, e))?;

        let client = handler.serve(transport).await.map_err(|e| {
            let err = format!("MCP handshake failed: {}", e);
            error!(server = %self.server_name, "{}", err);
            McpSkillError::Connection(err)
        })?;

        debug!(server = %self.server_name, "STDIO server connected");
        Ok(client)
    }

    fn transport_type(&self) -> TransportType {
        TransportType::Stdio
    }

    fn description(&self) -> String {
        format!("stdio:{}", self.command)
    }
}

/// Platform-specific child process isolation.
///
/// Unix: the child gets its own process group so terminal signals sent to
/// this CLI (SIGINT, SIGTSTP) are not delivered to the server directly; the
/// server is shut down through the session instead.
/// Windows: suppress the console window a console-subsystem child would get.
pub fn configure_child_process_platform(cmd: &mut Command) {
    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(unix)]
    {
        cmd.process_group(0);
    }
}

/// Split a command string that may contain embedded arguments.
///
/// Configs copied from desktop clients often put everything in `command`:
/// - "docker run -i --rm image" → ("docker", ["run", "-i", "--rm", "image"])
/// - "npx -y @some/server" → ("npx", ["-y", "@some/server"])
/// - "node" with args: ["server.js"] → ("node", ["server.js"])
///
/// The string is only split when no separate args are given.
pub fn parse_command(command: &str, args: &[String]) -> Result<(String, Vec<String>)> {
    if !args.is_empty() || !command.contains(char::is_whitespace) {
        return Ok((command.to_string(), args.to_vec()));
    }

    let mut parts = shell_words::split(command).map_err(|e| {
        McpSkillError::connection(format!(
            "Failed to parse command string '{}': {}",
            command, e
        ))
    })?
    .into_iter();

    let executable = parts
        .next()
        .ok_or_else(|| McpSkillError::connection("Empty command after parsing"))?;
    Ok((executable, parts.collect()))
}
