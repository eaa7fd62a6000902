//! Command handlers

pub mod exec;
pub mod generate;

use mcpskill_mcp::SessionOptions;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub session_options: SessionOptions,
}
