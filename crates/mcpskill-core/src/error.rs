//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error raised while loading or normalizing a server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax error, or a descriptor field of the wrong type.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Any parse or normalization failure of a file, tagged with its path.
    /// The wrapped error's message is part of this one's.
    #[error("invalid configuration file {}: {error}", path.display())]
    InFile {
        path: PathBuf,
        error: Box<ConfigError>,
    },

    /// The JSON is well formed but is not a server descriptor.
    #[error("invalid configuration: {0}")]
    InvalidShape(String),

    /// The `mcpServers` wrapper holds no entries.
    #[error("No MCP servers found in config")]
    NoServers,

    /// The `type` field names a transport this tool cannot speak.
    #[error("Unsupported transport type: {0}")]
    UnsupportedTransport(String),

    /// A field required by the selected transport is absent.
    #[error("server '{server}' is missing required field '{field}' for {transport} transport")]
    MissingField {
        server: String,
        field: &'static str,
        transport: &'static str,
    },
}

impl ConfigError {
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// Wrap `self` with the file it was raised for
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            error: Box::new(self),
        }
    }

    /// The error with any file tag removed
    pub fn inner(&self) -> &ConfigError {
        match self {
            Self::InFile { error, .. } => error.inner(),
            other => other,
        }
    }
}
