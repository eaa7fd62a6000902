//! `mcpskill exec` - runtime entry point for generated skills
//!
//! Prints exactly one pretty JSON document to stdout per invocation:
//! - `--list` - array of `{name, description}`
//! - `--describe <tool>` - the full tool record including `inputSchema`
//! - `--call <json>` - the content array returned by the server

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{ArgGroup, Args};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use mcpskill_mcp::ToolGateway;

use super::Context;

/// Arguments for `mcpskill exec`.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["list", "describe", "call"]),
))]
pub struct ExecArgs {
    /// Path to the MCP server configuration JSON
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,

    /// List available tools
    #[arg(long)]
    pub list: bool,

    /// Show the full definition of one tool
    #[arg(long, value_name = "TOOL")]
    pub describe: Option<String>,

    /// Call a tool: '{"tool": "name", "arguments": {...}}'
    #[arg(long, value_name = "JSON")]
    pub call: Option<String>,
}

/// Payload of `--call`
#[derive(Debug, Deserialize)]
pub struct CallRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

#[derive(Debug)]
enum Action {
    List,
    Describe(String),
    Call(CallRequest),
}

impl ExecArgs {
    /// Resolve the requested action; `--call` JSON is validated before any connection is made.
    fn action(&self) -> Result<Action> {
        if let Some(raw) = &self.call {
            let request: CallRequest = serde_json::from_str(raw)
                .context("Invalid --call payload, expected {\"tool\": string, \"arguments\": object}")?;
            return Ok(Action::Call(request));
        }
        if let Some(name) = &self.describe {
            return Ok(Action::Describe(name.clone()));
        }
        if self.list {
            return Ok(Action::List);
        }
        bail!("One of --list, --describe or --call is required")
    }
}

pub async fn run(args: ExecArgs, ctx: &Context) -> Result<()> {
    execute(args, ctx, &mut std::io::stdout()).await
}

/// Run one action and write its JSON document to `out`.
///
/// Nothing is written when the action or the session close fails.
pub async fn execute(args: ExecArgs, ctx: &Context, out: &mut (impl Write + Send)) -> Result<()> {
    let action = args.action()?;
    let mut gateway = ToolGateway::from_config_file(&args.config, ctx.session_options.clone())
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;

    let outcome = perform(&mut gateway, action).await;
    let closed = gateway.close().await;

    let output = outcome?;
    closed.context("Failed to close MCP session")?;

    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

async fn perform(gateway: &mut ToolGateway, action: Action) -> Result<Value> {
    match action {
        Action::List => {
            let tools = gateway.list_tools().await.context("Failed to list tools")?;
            debug!(tool_count = tools.len(), "Listed tools");
            Ok(serde_json::to_value(tools)?)
        }
        Action::Describe(name) => match gateway.describe_tool(&name).await? {
            Some(tool) => Ok(serde_json::to_value(tool)?),
            None => bail!("Tool not found: {}", name),
        },
        Action::Call(request) => {
            let content = gateway
                .call_tool(&request.tool, request.arguments.unwrap_or_default())
                .await
                .with_context(|| format!("Tool call failed: {}", request.tool))?;
            Ok(serde_json::to_value(content)?)
        }
    }
}
