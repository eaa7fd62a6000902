//! CLI integration tests
//!
//! Skill generation and `exec` end to end against the echo fixture.


pub const ECHO_SERVER: &str = env!("CARGO_BIN_EXE_echo-mcp-server");
