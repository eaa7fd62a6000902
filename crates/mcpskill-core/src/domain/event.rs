//! Skill generation events
//!
//! The generator reports progress as events instead of printing. The CLI
//! subscribes and renders them; tests subscribe and assert on them.
//!
//! Events serialize with a `type` field holding the snake_case variant name:
//! ```json
//! { "type": "file_written", "file_name": "SKILL.md", "path": "/out/SKILL.md" }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config::ConfigWarning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEvent {
    /// Config normalized and generation is about to start
    GenerationStarted {
        server_name: String,
        output_dir: PathBuf,
    },

    /// The config normalizer had something to say
    ConfigWarning { warning: ConfigWarning },

    /// About to connect to the server and list its tools
    IntrospectionStarted { target: String },

    /// Tool listing succeeded
    IntrospectionFinished { tool_count: usize },

    /// Tool listing failed; generation continues with no tools
    IntrospectionFailed { error: String },

    /// One output file was written
    FileWritten { file_name: String, path: PathBuf },

    /// All files were written
    GenerationCompleted {
        server_name: String,
        output_dir: PathBuf,
        tool_count: usize,
    },
}

impl SkillEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GenerationStarted { .. } => "generation_started",
            Self::ConfigWarning { .. } => "config_warning",
            Self::IntrospectionStarted { .. } => "introspection_started",
            Self::IntrospectionFinished { .. } => "introspection_finished",
            Self::IntrospectionFailed { .. } => "introspection_failed",
            Self::FileWritten { .. } => "file_written",
            Self::GenerationCompleted { .. } => "generation_completed",
        }
    }

    /// Whether the event reports a degraded outcome
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::ConfigWarning { .. } | Self::IntrospectionFailed { .. }
        )
    }
}
