//! HTTP transport for MCP servers
//!
//! Connects over Streamable HTTP. Configured headers become default headers
//! of the underlying `reqwest::Client`, so every request of the session
//! (handshake, listing, calls, shutdown) carries them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::ServiceExt;
use tracing::{debug, error, info};

use super::{Transport, TransportType};
use crate::error::{McpSkillError, Result};
use crate::session::{McpClient, McpClientHandler};

/// HTTP transport for Streamable HTTP MCP servers
pub struct HttpTransport {
    server_name: String,
    url: String,
    headers: BTreeMap<String, String>,
}

impl HttpTransport {
    pub fn new(server_name: String, url: String, headers: BTreeMap<String, String>) -> Self {
        Self {
            server_name,
            url,
            headers,
        }
    }

    fn fail(&self, err: String) -> McpSkillError {
        error!(server = %self.server_name, "{}", err);
        McpSkillError::Connection(err)
    }

    /// Build a reqwest HeaderMap from the configured headers.
    fn build_default_headers(&self) -> Result<HeaderMap> {
        let mut header_map = HeaderMap::new();
        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| self.fail(format!("Invalid header name '{}': {}", key, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| self.fail(format!("Invalid header value for '{}': {}", key, e)))?;
            header_map.insert(header_name, header_value);
        }
        Ok(header_map)
    }

    /// Build a reqwest::Client with the configured headers as default_headers.
    fn build_http_client(&self, header_map: HeaderMap) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .default_headers(header_map)
            .build()
            .map_err(|e| self.fail(format!("Failed to build HTTP client: {}", e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn connect(&self, handler: McpClientHandler) -> Result<McpClient> {
        info!(
            server = %self.server_name,
            url = %self.url,
            header_count = self.headers.len(),
            "Connecting to HTTP server"
        );

        url::Url::parse(&self.url)
            .map_err(|e| self.fail(format!("Invalid URL '{}': {}", self.url, e)))?;

        let header_map = self.build_default_headers()?;
        let client = self.build_http_client(header_map)?;

        let transport_config = StreamableHttpClientTransportConfig::with_uri(self.url.as_str());
        let transport = StreamableHttpClientTransport::with_client(client, transport_config);

        let client = handler
            .serve(transport)
            .await
            .map_err(|e| self.fail(format!("HTTP connection failed: {}", e)))?;

        debug!(server = %self.server_name, "HTTP server connected");
        Ok(client)
    }

    fn transport_type(&self) -> TransportType {
        TransportType::StreamableHttp
    }

    fn description(&self) -> String {
        format!("http:{}", self.url)
    }
}
