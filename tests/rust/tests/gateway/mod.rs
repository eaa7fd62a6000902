//! Gateway integration tests
//!
//! Tool gateway state machine and stdio sessions against the echo fixture.

mod stdio_session;
mod tool_gateway;

pub const ECHO_SERVER: &str = env!("CARGO_BIN_EXE_echo-mcp-server");
