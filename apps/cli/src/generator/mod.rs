//! Skill generator
//!
//! Turns one MCP server config into a skill directory:
//!
//! | File | Content |
//! |------|---------|
//! | `SKILL.md` | frontmatter, usage, tool list |
//! | `executor.sh` | shim delegating to `mcpskill exec` |
//! | `mcp-config.json` | the normalized server config |
//! | `skill.json` | manifest naming the runtime binary and version |
//!
//! Progress is reported as [`SkillEvent`]s, never printed. Introspection
//! failure is not fatal here: the skill is written with an empty tool list.

mod templates;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use mcpskill_core::{load_config_file, EventSender, ServerConfig, SkillEvent, Tool};
use mcpskill_mcp::{introspect_server, SessionOptions};
use tracing::{info, warn};

pub use templates::{build_manifest, render_executor_sh, render_skill_md, skill_name, SkillManifest};

pub const SKILL_MD: &str = "SKILL.md";
pub const EXECUTOR_SH: &str = "executor.sh";
pub const MCP_CONFIG_JSON: &str = "mcp-config.json";
pub const SKILL_JSON: &str = "skill.json";

/// What a finished generation produced
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub server_name: String,
    pub output_dir: PathBuf,
    pub tool_count: usize,
    pub introspection_failed: bool,
    pub files: Vec<PathBuf>,
}

pub struct SkillGenerator {
    config_path: PathBuf,
    output_dir: PathBuf,
    options: SessionOptions,
    events: EventSender,
}

impl SkillGenerator {
    /// Relative paths are resolved against the current directory.
    pub fn new(config_path: impl AsRef<Path>, output_dir: impl AsRef<Path>, events: EventSender) -> Result<Self> {
        Ok(Self {
            config_path: absolute(config_path.as_ref())?,
            output_dir: absolute(output_dir.as_ref())?,
            options: SessionOptions::default(),
            events,
        })
    }

    pub fn with_session_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn generate(&self) -> Result<GenerationSummary> {
        let normalized = load_config_file(&self.config_path)
            .with_context(|| format!("Failed to load MCP config {}", self.config_path.display()))?;
        for warning in normalized.warnings {
            self.events.emit(SkillEvent::ConfigWarning { warning });
        }
        let config = normalized.server;

        self.events.emit(SkillEvent::GenerationStarted {
            server_name: config.name().to_string(),
            output_dir: self.output_dir.clone(),
        });

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", self.output_dir.display()))?;

        let (tools, introspection_failed) = match self.introspect(&config).await {
            Some(tools) => (tools, false),
            None => (Vec::new(), true),
        };

        let files = vec![
            self.write(SKILL_MD, render_skill_md(&config, &tools)?).await?,
            self.write_executor(render_executor_sh(&config)?).await?,
            self.write(MCP_CONFIG_JSON, to_pretty_json(&config)?).await?,
            self.write(SKILL_JSON, to_pretty_json(&build_manifest(&config, tools.len()))?).await?,
        ];

        info!(
            server = %config.name(),
            output_dir = %self.output_dir.display(),
            tool_count = tools.len(),
            "Skill generated"
        );
        self.events.emit(SkillEvent::GenerationCompleted {
            server_name: config.name().to_string(),
            output_dir: self.output_dir.clone(),
            tool_count: tools.len(),
        });

        Ok(GenerationSummary {
            server_name: config.name().to_string(),
            output_dir: self.output_dir.clone(),
            tool_count: tools.len(),
            introspection_failed,
            files,
        })
    }

    /// `None` when the server could not be introspected
    async fn introspect(&self, config: &ServerConfig) -> Option<Vec<Tool>> {
        self.events.emit(SkillEvent::IntrospectionStarted {
            target: config.display_target().to_string(),
        });

        match introspect_server(config, self.options.clone()).await {
            Ok(tools) => {
                self.events.emit(SkillEvent::IntrospectionFinished {
                    tool_count: tools.len(),
                });
                Some(tools)
            }
            Err(e) => {
                warn!(server = %config.name(), error = %e, "Introspection failed, using empty tool list");
                self.events.emit(SkillEvent::IntrospectionFailed {
                    error: e.to_string(),
                });
                None
            }
        }
    }

    async fn write(&self, file_name: &str, content: String) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        self.events.emit(SkillEvent::FileWritten {
            file_name: file_name.to_string(),
            path: path.clone(),
        });
        Ok(path)
    }

    async fn write_executor(&self, content: String) -> Result<PathBuf> {
        let path = self.write(EXECUTOR_SH, content).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .await
                .with_context(|| format!("Failed to make {} executable", path.display()))?;
        }

        Ok(path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
