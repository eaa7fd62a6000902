//! # mcpskill Core Library
//!
//! Domain types shared by the session layer and the skill generator.
//!
//! ## Modules
//!
//! - `domain` - Server configuration, tools, generator events
//! - `error` - Configuration error taxonomy
//! - `event_bus` - Broadcast distribution of generator events
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mcpskill_core::load_config_file;
//!
//! let normalized = load_config_file("mcp.json")?;
//! for warning in &normalized.warnings {
//!     eprintln!("{warning}");
//! }
//! println!("server: {}", normalized.server.name());
//! ```

pub mod domain;
pub mod error;
pub mod event_bus;

pub use domain::*;
pub use error::{ConfigError, Result};
pub use event_bus::{EventBus, EventReceiver, EventSender};
