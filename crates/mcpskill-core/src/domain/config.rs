//! Config file loading and normalization
//!
//! Two file shapes are accepted:
//!
//! - Direct: a single descriptor, `{ "name": ..., "command": ... }`
//! - Wrapper: the desktop-client format, `{ "mcpServers": { "<name>": { ... } } }`
//!
//! Both normalize to exactly one [`ServerConfig`]. A wrapper with several
//! entries selects the first key in file order and reports the rest as a
//! [`ConfigWarning`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::server::{ServerConfig, ServerEntry};
use crate::error::{ConfigError, Result};

const SERVERS_KEY: &str = "mcpServers";

/// Non-fatal problem found while normalizing a config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// The wrapper held more than one server; only `selected` is used.
    MultipleServers {
        selected: String,
        discarded: Vec<String>,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleServers {
                selected,
                discarded,
            } => write!(
                f,
                "Multiple servers found. Using first: {}. Ignoring: {}",
                selected,
                discarded.join(", ")
            ),
        }
    }
}

/// A config reduced to one server, plus anything worth telling the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedConfig {
    pub server: ServerConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Normalize an already-parsed JSON document.
pub fn normalize_config(raw: Value) -> Result<NormalizedConfig> {
    let Value::Object(mut object) = raw else {
        return Err(ConfigError::invalid_shape("config must be a JSON object"));
    };

    match object.remove(SERVERS_KEY) {
        Some(servers) => normalize_wrapper(servers),
        None => {
            let entry: ServerEntry = serde_json::from_value(Value::Object(object))?;
            let server = ServerConfig::try_from(entry)?;
            debug!(server = %server.name(), "Loaded direct server descriptor");
            Ok(NormalizedConfig {
                server,
                warnings: Vec::new(),
            })
        }
    }
}

fn normalize_wrapper(servers: Value) -> Result<NormalizedConfig> {
    let Value::Object(servers) = servers else {
        return Err(ConfigError::invalid_shape(format!(
            "'{}' must be an object keyed by server name",
            SERVERS_KEY
        )));
    };

    // serde_json's preserve_order keeps this in file order
    let mut entries = servers.into_iter();
    let Some((selected, value)) = entries.next() else {
        return Err(ConfigError::NoServers);
    };
    let discarded: Vec<String> = entries.map(|(name, _)| name).collect();

    let entry: ServerEntry = serde_json::from_value(value)?;
    let mut server = ServerConfig::try_from(entry)?;
    server.set_name(selected.clone());

    let mut warnings = Vec::new();
    if !discarded.is_empty() {
        let warning = ConfigWarning::MultipleServers {
            selected,
            discarded,
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    debug!(server = %server.name(), "Loaded server from {} wrapper", SERVERS_KEY);
    Ok(NormalizedConfig { server, warnings })
}

/// Parse and normalize a JSON string.
pub fn parse_config_str(content: &str) -> Result<NormalizedConfig> {
    let raw: Value = serde_json::from_str(content)?;
    normalize_config(raw)
}

/// Read, parse and normalize a config file.
///
/// Relative paths are resolved against the current directory so error
/// messages name the file that was actually looked up.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<NormalizedConfig> {
    let path = resolve_path(path.as_ref());
    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "Read config file");

    serde_json::from_str::<Value>(&content)
        .map_err(ConfigError::from)
        .and_then(normalize_config)
        .map_err(|err| err.in_file(path))
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
