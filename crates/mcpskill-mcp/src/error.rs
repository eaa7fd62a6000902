//! Error types for session and gateway operations.

use mcpskill_core::ConfigError;
use thiserror::Error;

/// Result type for session and gateway operations.
pub type Result<T> = std::result::Result<T, McpSkillError>;

/// Error type for session and gateway operations.
///
/// Errors reported by the remote server are carried as-is in
/// [`McpSkillError::Protocol`]; nothing here retries or reclassifies them.
#[derive(Debug, Error)]
pub enum McpSkillError {
    /// The server configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport could not be established: spawn failure, bad URL or
    /// header, handshake rejected or timed out.
    #[error("connection error: {0}")]
    Connection(String),

    /// The session is up but the server answered a request with an error.
    #[error("protocol error: {0}")]
    Protocol(#[from] rmcp::ServiceError),

    /// The gateway was closed and cannot be used again.
    #[error("tool gateway is closed")]
    GatewayClosed,
}

impl McpSkillError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}
