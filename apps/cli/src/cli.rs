//! Command-line structure

use std::time::Duration;

use clap::{Parser, Subcommand};
use mcpskill_mcp::SessionOptions;

use crate::commands::{exec, generate};

/// mcpskill - Turn an MCP server into a skill that loads its tools on demand
#[derive(Parser, Debug)]
#[command(name = "mcpskill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Handshake timeout in seconds (default: no limit)
    #[arg(long, global = true, env = "MCPSKILL_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Introspect an MCP server and write a skill directory
    Generate(generate::GenerateArgs),

    /// List, describe or call the tools of a configured MCP server
    Exec(exec::ExecArgs),
}

impl Cli {
    pub fn session_options(&self) -> SessionOptions {
        match self.timeout {
            Some(secs) => SessionOptions::default().with_handshake_timeout(Duration::from_secs(secs)),
            None => SessionOptions::default(),
        }
    }
}
