//! Session Manager
//!
//! Opens one MCP session for a [`ServerConfig`]: select the transport, spawn
//! or connect, run the `initialize` handshake once. No retries.
//!
//! By default no timeout is layered over the handshake; a server that never
//! answers blocks until the transport itself gives up. Callers that need a
//! bound set [`SessionOptions::handshake_timeout`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mcpskill_core::{ServerConfig, Tool};
use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        ServerInfo,
    },
    service::RunningService,
    ClientHandler, RoleClient,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{McpSkillError, Result};
use crate::transport::{TransportFactory, TransportType};

/// Type alias for a connected MCP client
pub type McpClient = RunningService<RoleClient, McpClientHandler>;

/// Client handler announcing mcpskill with an empty capability set
#[derive(Clone)]
pub struct McpClientHandler {
    info: ClientInfo,
}

impl McpClientHandler {
    pub fn new(server_name: &str) -> Self {
        Self {
            info: ClientInfo {
                protocol_version: Default::default(),
                capabilities: ClientCapabilities::default(),
                client_info: Implementation {
                    name: format!("mcpskill-{}", server_name),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    title: Some("mcpskill".to_string()),
                    ..Default::default()
                },
                meta: None,
            },
        }
    }
}

impl ClientHandler for McpClientHandler {
    fn get_info(&self) -> ClientInfo {
        self.info.clone()
    }
}

/// Knobs for opening a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Upper bound on transport open + handshake. `None` leaves it to the transport.
    pub handshake_timeout: Option<Duration>,
}

impl SessionOptions {
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = Some(timeout);
        self
    }
}

/// One open MCP session.
///
/// Owned by whoever opened it. [`McpSession::close`] consumes the session so
/// it cannot be closed twice; a session dropped without closing is torn down
/// best-effort (the child process is killed on drop).
pub struct McpSession {
    server_name: String,
    transport_type: TransportType,
    client: McpClient,
}

impl McpSession {
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn transport_type(&self) -> TransportType {
        self.transport_type
    }

    /// Server info received during the handshake
    pub fn peer_info(&self) -> Option<&ServerInfo> {
        self.client.peer_info()
    }

    /// Issue one `tools/list` request
    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        let result = self.client.peer().list_tools(Default::default()).await?;

        debug!(
            server = %self.server_name,
            tool_count = result.tools.len(),
            "Retrieved tools from server"
        );

        Ok(result.tools.into_iter().map(convert_tool).collect())
    }

    /// Issue one `tools/call` request, arguments passed verbatim
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<CallToolResult> {
        debug!(server = %self.server_name, tool = %name, "Calling tool");

        let result = self
            .client
            .peer()
            .call_tool(CallToolRequestParams {
                name: name.to_string().into(),
                arguments: Some(arguments),
                task: None,
                meta: None,
            })
            .await?;

        Ok(result)
    }

    /// Shut the session down gracefully
    pub async fn close(self) -> Result<()> {
        info!(server = %self.server_name, "Closing MCP session");
        let reason = self.client.cancel().await.map_err(|e| {
            McpSkillError::connection(format!("Failed to shut down session: {}", e))
        })?;
        debug!(server = %self.server_name, ?reason, "MCP session closed");
        Ok(())
    }
}

fn convert_tool(tool: rmcp::model::Tool) -> Tool {
    Tool {
        name: tool.name.into_owned(),
        description: tool.description.map(|d| d.into_owned()),
        input_schema: (*tool.input_schema).clone(),
    }
}

/// Opens sessions. Holds no sessions itself.
#[derive(Debug, Default)]
pub struct SessionManager {
    options: SessionOptions,
    opened: AtomicUsize,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Number of sessions successfully opened by this manager
    pub fn sessions_opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    /// Open a session to the configured server
    pub async fn open(&self, config: &ServerConfig) -> Result<McpSession> {
        let transport = TransportFactory::create(config);
        let handler = McpClientHandler::new(config.name());

        info!(
            server = %config.name(),
            transport = %transport.description(),
            "Opening MCP session"
        );

        let connect = transport.connect(handler);
        let client = match self.options.handshake_timeout {
            Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
                warn!(server = %config.name(), ?limit, "Handshake timed out");
                McpSkillError::connection(format!("Connection timeout ({:?})", limit))
            })??,
            None => connect.await?,
        };

        if let Some(peer) = client.peer_info() {
            debug!(
                server = %config.name(),
                peer_name = %peer.server_info.name,
                peer_version = %peer.server_info.version,
                "Handshake complete"
            );
        }

        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(McpSession {
            server_name: config.name().to_string(),
            transport_type: transport.transport_type(),
            client,
        })
    }
}
