//! # mcpskill MCP Library
//!
//! Session management and tool access for one MCP server.
//!
//! This crate provides:
//! - Transport selection (stdio child process or Streamable HTTP)
//! - `SessionManager`: open a session with a single handshake
//! - `ToolGateway`: list, describe and call tools over a lazily opened session
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       ToolGateway                         │
//! │   Unconnected ──▶ Connected(McpSession) ──▶ Closed        │
//! └──────────────────────────────────────────────────────────┘
//!                             │ open
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     SessionManager                        │
//! │  ┌──────────────────┐        ┌──────────────────┐        │
//! │  │  StdioTransport  │        │   HttpTransport  │        │
//! │  │  (child process) │        │ (streamable HTTP)│        │
//! │  └──────────────────┘        └──────────────────┘        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mcpskill_core::ServerConfig;
//! use mcpskill_mcp::ToolGateway;
//!
//! let server = ServerConfig::stdio("github", "npx", vec![
//!     "-y".to_string(),
//!     "@modelcontextprotocol/server-github".to_string(),
//! ]);
//!
//! let mut gateway = ToolGateway::new(server);
//! let tools = gateway.list_tools().await?;
//! let content = gateway.call_tool("search_code", args).await;
//! gateway.close().await?;
//! ```

pub mod error;
pub mod gateway;
pub mod session;
pub mod transport;

pub use error::{McpSkillError, Result};
pub use gateway::{introspect_server, GatewayStateKind, ToolGateway};
pub use session::{McpClient, McpClientHandler, McpSession, SessionManager, SessionOptions};
pub use transport::{Transport, TransportFactory, TransportType};

pub use rmcp::model::Content;
