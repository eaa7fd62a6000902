//! Echo MCP server over stdio, spawned by the integration tests

use rmcp::{transport::stdio, ServiceExt};
use tests::EchoServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let service = EchoServer.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
