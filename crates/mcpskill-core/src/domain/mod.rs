//! Domain types
//!
//! - Server configuration (`ServerConfig` and its on-disk shapes)
//! - Tools (`Tool`, `ToolSummary`)
//! - Generator events (`SkillEvent`)

pub mod config;
mod event;
mod server;
mod tool;

pub use config::{
    load_config_file, normalize_config, parse_config_str, ConfigWarning, NormalizedConfig,
};
pub use event::SkillEvent;
pub use server::{HttpConfig, HttpKind, ServerConfig, ServerEntry, StdioConfig, TransportKind};
pub use tool::{Tool, ToolSummary};
