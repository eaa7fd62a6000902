//! Tool Gateway
//!
//! Discovery and invocation over at most one session, driven by an explicit
//! state machine:
//!
//! ```text
//!   Unconnected ──connect / first list/describe/call──▶ Connected
//!        │                                                  │
//!        └──────────────── close ──────▶ Closed ◀── close ──┘
//! ```
//!
//! A failed connect leaves the gateway `Unconnected`. `Closed` is terminal:
//! further operations fail with [`McpSkillError::GatewayClosed`] and further
//! `close` calls are no-ops.

use std::path::Path;

use mcpskill_core::{load_config_file, ServerConfig, Tool, ToolSummary};
use rmcp::model::Content;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{McpSkillError, Result};
use crate::session::{McpSession, SessionManager, SessionOptions};

enum GatewayState {
    Unconnected,
    Connected(McpSession),
    Closed,
}

/// Observable gateway state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStateKind {
    Unconnected,
    Connected,
    Closed,
}

/// List, describe and call the tools of one server.
pub struct ToolGateway {
    config: ServerConfig,
    manager: SessionManager,
    state: GatewayState,
}

impl ToolGateway {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_manager(config, SessionManager::new())
    }

    pub fn with_options(config: ServerConfig, options: SessionOptions) -> Self {
        Self::with_manager(config, SessionManager::with_options(options))
    }

    pub fn with_manager(config: ServerConfig, manager: SessionManager) -> Self {
        Self {
            config,
            manager,
            state: GatewayState::Unconnected,
        }
    }

    /// Build a gateway from a config file (direct or `mcpServers` wrapper).
    ///
    /// Normalization warnings are logged; the file is not touched again.
    pub fn from_config_file(path: impl AsRef<Path>, options: SessionOptions) -> Result<Self> {
        let normalized = load_config_file(path)?;
        Ok(Self::with_options(normalized.server, options))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.manager
    }

    pub fn state(&self) -> GatewayStateKind {
        match self.state {
            GatewayState::Unconnected => GatewayStateKind::Unconnected,
            GatewayState::Connected(_) => GatewayStateKind::Connected,
            GatewayState::Closed => GatewayStateKind::Closed,
        }
    }

    /// `Unconnected → Connected`. No-op when already connected.
    pub async fn connect(&mut self) -> Result<()> {
        self.session().await.map(|_| ())
    }

    async fn session(&mut self) -> Result<&McpSession> {
        if let GatewayState::Unconnected = self.state {
            debug!(server = %self.config.name(), "Opening session");
            let session = self.manager.open(&self.config).await?;
            self.state = GatewayState::Connected(session);
        }

        match &self.state {
            GatewayState::Connected(session) => Ok(session),
            GatewayState::Unconnected | GatewayState::Closed => Err(McpSkillError::GatewayClosed),
        }
    }

    /// Every tool with its full record
    pub async fn tools(&mut self) -> Result<Vec<Tool>> {
        self.session().await?.list_tools().await
    }

    /// Tool names and descriptions; schemas are left out of this view
    pub async fn list_tools(&mut self) -> Result<Vec<ToolSummary>> {
        let tools = self.tools().await?;
        Ok(tools.into_iter().map(ToolSummary::from).collect())
    }

    /// Full record of the first tool named exactly `name`.
    ///
    /// Re-lists on every call; there is no per-tool request in the protocol.
    /// `None` means the server does not advertise that tool.
    pub async fn describe_tool(&mut self, name: &str) -> Result<Option<Tool>> {
        let tools = self.tools().await?;
        let found = tools.into_iter().find(|tool| tool.name == name);
        if found.is_none() {
            debug!(server = %self.config.name(), tool = %name, "Tool not advertised");
        }
        Ok(found)
    }

    /// Invoke a tool and return its content exactly as the server sent it.
    ///
    /// Arguments are not checked against the tool's schema; the server
    /// validates them.
    pub async fn call_tool(&mut self, name: &str, arguments: Map<String, Value>) -> Result<Vec<Content>> {
        let result = self.session().await?.call_tool(name, arguments).await?;
        if result.is_error == Some(true) {
            debug!(server = %self.config.name(), tool = %name, "Tool reported an error result");
        }
        Ok(result.content)
    }

    /// Release the session if one is open. Safe to call any number of times.
    pub async fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, GatewayState::Closed) {
            GatewayState::Connected(session) => session.close().await,
            GatewayState::Unconnected => {
                debug!(server = %self.config.name(), "Closing gateway that never connected");
                Ok(())
            }
            GatewayState::Closed => Ok(()),
        }
    }
}

impl Drop for ToolGateway {
    fn drop(&mut self) {
        if let GatewayState::Connected(session) = &self.state {
            warn!(
                server = %session.server_name(),
                "Tool gateway dropped with an open session; relying on drop cleanup"
            );
        }
    }
}

/// Open a session, list every tool, close the session.
///
/// The session is closed whether or not the listing succeeded. A listing
/// error wins over a close error.
pub async fn introspect_server(config: &ServerConfig, options: SessionOptions) -> Result<Vec<Tool>> {
    let mut gateway = ToolGateway::with_options(config.clone(), options);
    let listed = gateway.tools().await;
    let closed = gateway.close().await;

    let tools = listed?;
    closed?;
    info!(server = %config.name(), tool_count = tools.len(), "Introspected server");
    Ok(tools)
}
