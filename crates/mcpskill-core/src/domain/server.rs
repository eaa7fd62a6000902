//! Server configuration
//!
//! A server descriptor is either stdio-based (spawn a command) or HTTP-based
//! (connect to a streamable HTTP endpoint). On disk both shapes share one flat
//! JSON object and are told apart by the optional `type` field:
//!
//! ```json
//! { "name": "github", "command": "npx", "args": ["-y", "@mcp/github"] }
//! { "name": "remote", "type": "http", "url": "https://example.com/mcp" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Transport named by a descriptor's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Local process via stdin/stdout. Implied when `type` is absent.
    #[default]
    Stdio,
    /// Streamable HTTP
    Http,
    /// Legacy name for streamable HTTP, kept for configs copied from other clients
    Sse,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Sse => "sse",
        }
    }

    /// Whether this kind is served by the streamable HTTP transport
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http | Self::Sse)
    }
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            "sse" => Ok(Self::Sse),
            other => Err(ConfigError::UnsupportedTransport(other.to_string())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two spellings accepted for an HTTP descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpKind {
    Http,
    Sse,
}

impl From<HttpKind> for TransportKind {
    fn from(kind: HttpKind) -> Self {
        match kind {
            HttpKind::Http => TransportKind::Http,
            HttpKind::Sse => TransportKind::Sse,
        }
    }
}

/// Stdio descriptor: spawn `command` with `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdioConfig {
    pub name: String,
    pub description: Option<String>,
    pub command: String,
    pub args: Vec<String>,
    /// Overlaid on top of the inherited environment of the spawning process.
    pub env: BTreeMap<String, String>,
}

/// HTTP descriptor: connect to `url`, sending `headers` on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub name: String,
    pub description: Option<String>,
    pub kind: HttpKind,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// A single MCP server descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ServerEntry")]
pub enum ServerConfig {
    Stdio(StdioConfig),
    Http(HttpConfig),
}

impl ServerConfig {
    /// Create a stdio config with no description and no env overlay
    pub fn stdio(name: impl Into<String>, command: impl Into<String>, args: Vec<String>) -> Self {
        Self::Stdio(StdioConfig {
            name: name.into(),
            description: None,
            command: command.into(),
            args,
            env: BTreeMap::new(),
        })
    }

    /// Create an HTTP config with no headers
    pub fn http(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            name: name.into(),
            description: None,
            kind: HttpKind::Http,
            url: url.into(),
            headers: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stdio(c) => &c.name,
            Self::Http(c) => &c.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Stdio(c) => c.description.as_deref(),
            Self::Http(c) => c.description.as_deref(),
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        match self {
            Self::Stdio(_) => TransportKind::Stdio,
            Self::Http(c) => c.kind.into(),
        }
    }

    /// Command or URL, for progress output
    pub fn display_target(&self) -> &str {
        match self {
            Self::Stdio(c) => &c.command,
            Self::Http(c) => &c.url,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Self::Stdio(c) => c.name = name,
            Self::Http(c) => c.name = name,
        }
    }
}

/// Flat on-disk shape of a descriptor.
///
/// Every field is optional here; [`ServerConfig::try_from`] decides which
/// transport the entry describes and rejects entries missing the fields that
/// transport needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    // --- Stdio Transport ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    // --- HTTP Transport ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

pub(crate) const UNNAMED_SERVER: &str = "unnamed-mcp-server";

impl TryFrom<ServerEntry> for ServerConfig {
    type Error = ConfigError;

    fn try_from(entry: ServerEntry) -> Result<Self, Self::Error> {
        let kind = match entry.transport.as_deref() {
            Some(t) => t.parse::<TransportKind>()?,
            None => TransportKind::Stdio,
        };
        let name = entry.name.unwrap_or_else(|| UNNAMED_SERVER.to_string());

        let http_kind = match kind {
            TransportKind::Stdio => {
                let command = entry.command.ok_or(ConfigError::MissingField {
                    server: name.clone(),
                    field: "command",
                    transport: "stdio",
                })?;
                return Ok(Self::Stdio(StdioConfig {
                    name,
                    description: entry.description,
                    command,
                    args: entry.args.unwrap_or_default(),
                    env: entry.env.unwrap_or_default(),
                }));
            }
            TransportKind::Http => HttpKind::Http,
            TransportKind::Sse => HttpKind::Sse,
        };

        let url = entry.url.ok_or(ConfigError::MissingField {
            server: name.clone(),
            field: "url",
            transport: kind.as_str(),
        })?;
        Ok(Self::Http(HttpConfig {
            name,
            description: entry.description,
            kind: http_kind,
            url,
            headers: entry.headers.unwrap_or_default(),
        }))
    }
}

impl From<ServerConfig> for ServerEntry {
    fn from(config: ServerConfig) -> Self {
        match config {
            ServerConfig::Stdio(c) => ServerEntry {
                name: Some(c.name),
                description: c.description,
                transport: Some(TransportKind::Stdio.as_str().to_string()),
                command: Some(c.command),
                args: Some(c.args),
                env: (!c.env.is_empty()).then_some(c.env),
                ..Default::default()
            },
            ServerConfig::Http(c) => ServerEntry {
                name: Some(c.name),
                description: c.description,
                transport: Some(TransportKind::from(c.kind).as_str().to_string()),
                url: Some(c.url),
                headers: (!c.headers.is_empty()).then_some(c.headers),
                ..Default::default()
            },
        }
    }
}
