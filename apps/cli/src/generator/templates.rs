//! Content of the generated skill files

use anyhow::{Context as _, Result};
use mcpskill_core::{ServerConfig, Tool};
use minijinja::{context, Environment};
use serde::Serialize;
use serde_json::Value;

/// Binary the shim delegates to, overridable at run time with `MCPSKILL_BIN`
pub const RUNTIME_BINARY: &str = "mcpskill";

const SKILL_MD_TEMPLATE: &str = r#"---
name: {{ skill_name }}
description: {{ description }}
---

# {{ server_name }}

This skill exposes the tools of the `{{ server_name }}` MCP server ({{ transport }}).
Tool definitions are loaded on demand through `executor.sh` instead of being
preloaded into context.

## Usage

List the available tools:

```bash
./executor.sh --list
```

Show the full definition of a tool, including its input schema:

```bash
./executor.sh --describe <tool-name>
```

Call a tool:

```bash
./executor.sh --call '{"tool": "<tool-name>", "arguments": {}}'
```

Every command prints JSON to stdout. Describe a tool before calling it so the
arguments match its input schema.

## Tools
{% if tools %}
{% for tool in tools %}

### {{ tool.name }}

{{ tool.description }}
{% if tool.parameters %}

Parameters:
{% for param in tool.parameters %}
- `{{ param.name }}`{% if param.kind %} ({{ param.kind }}){% endif %}{% if param.required %}, required{% endif %}{% if param.description %}: {{ param.description }}{% endif %}

{% endfor %}
{% endif %}
{% endfor %}
{% else %}

No tools could be discovered when this skill was generated. Run
`./executor.sh --list` to query the server directly.
{% endif %}
"#;

const EXECUTOR_SH_TEMPLATE: &str = r#"#!/bin/sh
# Runtime shim for the {{ skill_name }} skill.
# Usage: executor.sh --list | --describe <tool> | --call '<json>'
set -e
SKILL_DIR="$(cd "$(dirname "$0")" && pwd)"
exec "${MCPSKILL_BIN:-{{ binary }}}" exec --config "$SKILL_DIR/mcp-config.json" "$@"
"#;

#[derive(Debug, Serialize)]
struct ToolView {
    name: String,
    description: String,
    parameters: Vec<ParameterView>,
}

#[derive(Debug, Serialize)]
struct ParameterView {
    name: String,
    kind: Option<String>,
    required: bool,
    description: Option<String>,
}

impl From<&Tool> for ToolView {
    fn from(tool: &Tool) -> Self {
        let required: Vec<&str> = tool
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let parameters = tool
            .input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, schema)| ParameterView {
                        name: name.clone(),
                        kind: schema.get("type").and_then(Value::as_str).map(str::to_string),
                        required: required.contains(&name.as_str()),
                        description: schema
                            .get("description")
                            .and_then(Value::as_str)
                            .map(|d| d.trim().to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: tool.name.clone(),
            description: tool
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("No description provided.")
                .to_string(),
            parameters,
        }
    }
}

/// Skill identifier derived from the server name: lowercase ASCII
/// alphanumerics separated by single hyphens.
pub fn skill_name(server_name: &str) -> String {
    let mut name = String::with_capacity(server_name.len());
    for c in server_name.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('-') {
            name.push('-');
        }
    }
    let trimmed = name.trim_end_matches('-');
    if trimmed.is_empty() {
        "mcp-skill".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One-line skill description for the frontmatter
pub fn skill_description(config: &ServerConfig) -> String {
    match config.description().map(str::trim).filter(|d| !d.is_empty()) {
        Some(description) => description.replace('\n', " "),
        None => format!(
            "Tools from the {} MCP server, loaded on demand",
            config.name()
        ),
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}

/// Frontmatter values are emitted as double-quoted scalars; a JSON string is
/// valid YAML and survives `: `, `#` and leading brackets.
fn yaml_scalar(value: &str) -> Result<String> {
    serde_json::to_string(value).context("Failed to quote frontmatter value")
}

pub fn render_skill_md(config: &ServerConfig, tools: &[Tool]) -> Result<String> {
    let tools: Vec<ToolView> = tools.iter().map(ToolView::from).collect();
    environment()
        .render_str(
            SKILL_MD_TEMPLATE,
            context! {
                skill_name => skill_name(config.name()),
                description => yaml_scalar(&skill_description(config))?,
                server_name => config.name(),
                transport => config.transport_kind().as_str(),
                tools => tools,
            },
        )
        .context("Failed to render SKILL.md")
}

pub fn render_executor_sh(config: &ServerConfig) -> Result<String> {
    environment()
        .render_str(
            EXECUTOR_SH_TEMPLATE,
            context! {
                skill_name => skill_name(config.name()),
                binary => RUNTIME_BINARY,
            },
        )
        .context("Failed to render executor.sh")
}

/// `skill.json`: what the skill is and which runtime it needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillManifest {
    pub name: String,
    pub description: String,
    pub server: String,
    pub transport: String,
    pub tool_count: usize,
    pub executor: String,
    pub config: String,
    pub runtime: RuntimeRequirement,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeRequirement {
    pub binary: String,
    pub version: String,
}

pub fn build_manifest(config: &ServerConfig, tool_count: usize) -> SkillManifest {
    SkillManifest {
        name: skill_name(config.name()),
        description: skill_description(config),
        server: config.name().to_string(),
        transport: config.transport_kind().as_str().to_string(),
        tool_count,
        executor: super::EXECUTOR_SH.to_string(),
        config: super::MCP_CONFIG_JSON.to_string(),
        runtime: RuntimeRequirement {
            binary: RUNTIME_BINARY.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}
