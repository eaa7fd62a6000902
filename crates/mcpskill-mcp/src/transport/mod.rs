//! Transport abstraction for MCP connections
//!
//! A [`Transport`] knows how to reach one server and run the MCP handshake
//! over it. [`TransportFactory::create`] is the single place where a
//! [`ServerConfig`] is mapped to a transport; the match is exhaustive, so a
//! new config variant cannot be added without deciding how to reach it.

mod http;
mod stdio;

use async_trait::async_trait;
use mcpskill_core::ServerConfig;

pub use http::HttpTransport;
pub use stdio::{configure_child_process_platform, parse_command, StdioTransport};

use crate::error::Result;
use crate::session::{McpClient, McpClientHandler};

/// Wire mechanism carrying MCP messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    /// Spawned child process, JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP (serves both `http` and `sse` descriptors)
    StreamableHttp,
}

/// Transport trait for MCP connections
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the transport and complete the MCP handshake.
    async fn connect(&self, handler: McpClientHandler) -> Result<McpClient>;

    /// Get the transport type
    fn transport_type(&self) -> TransportType;

    /// Get a description for logging
    fn description(&self) -> String;
}

/// Factory for creating transport instances
pub struct TransportFactory;

impl TransportFactory {
    /// Select and build the transport for a server config.
    ///
    /// Selection depends only on the config variant (and therefore on its
    /// `type` field); no other field is consulted and nothing falls back.
    pub fn create(config: &ServerConfig) -> Box<dyn Transport> {
        match config {
            ServerConfig::Stdio(c) => Box::new(StdioTransport::new(
                c.name.clone(),
                c.command.clone(),
                c.args.clone(),
                c.env.clone(),
            )),
            ServerConfig::Http(c) => Box::new(HttpTransport::new(
                c.name.clone(),
                c.url.clone(),
                c.headers.clone(),
            )),
        }
    }
}
