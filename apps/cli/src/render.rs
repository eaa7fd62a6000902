//! Terminal rendering of generator events

use std::io::Write;

use mcpskill_core::SkillEvent;

use crate::generator::{GenerationSummary, EXECUTOR_SH, MCP_CONFIG_JSON, SKILL_JSON, SKILL_MD};

/// Approximate context cost of one preloaded tool definition
const TOKENS_PER_TOOL: usize = 500;
/// Approximate context cost of a skill's frontmatter
const SKILL_STUB_TOKENS: usize = 100;

/// One line per event; `None` for events that need no line of their own.
pub fn event_line(event: &SkillEvent) -> Option<String> {
    match event {
        SkillEvent::GenerationStarted { server_name, .. } => {
            Some(format!("Generating skill for MCP server: {}", server_name))
        }
        SkillEvent::ConfigWarning { warning } => Some(format!("Warning: {}", warning)),
        SkillEvent::IntrospectionStarted { target } => {
            Some(format!("Introspecting MCP server: {}", target))
        }
        SkillEvent::IntrospectionFinished { tool_count } => {
            Some(format!("Found {} tools", tool_count))
        }
        SkillEvent::IntrospectionFailed { error } => Some(format!(
            "Warning: Could not introspect MCP server: {}\nUsing empty tool list. You may need to update {} manually.",
            error, SKILL_MD
        )),
        SkillEvent::FileWritten { file_name, .. } => Some(format!("  Generated: {}", file_name)),
        SkillEvent::GenerationCompleted { .. } => None,
    }
}

pub fn render_event(out: &mut impl Write, event: &SkillEvent) -> std::io::Result<()> {
    match event_line(event) {
        Some(line) => writeln!(out, "{}", line),
        None => Ok(()),
    }
}

/// Estimated context reduction in percent, `None` without tools
pub fn context_reduction(tool_count: usize) -> Option<usize> {
    let before = tool_count * TOKENS_PER_TOOL;
    if before <= SKILL_STUB_TOKENS {
        return None;
    }
    Some(((before - SKILL_STUB_TOKENS) * 100 + before / 2) / before)
}

pub fn render_summary(out: &mut impl Write, summary: &GenerationSummary) -> std::io::Result<()> {
    let rule = "=".repeat(60);
    let dir = summary.output_dir.display();

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Skill generation complete!")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Generated files in: {}", dir)?;
    writeln!(out, "  - {} (instructions for the agent)", SKILL_MD)?;
    writeln!(out, "  - {} (runtime shim)", EXECUTOR_SH)?;
    writeln!(out, "  - {} (MCP server configuration)", MCP_CONFIG_JSON)?;
    writeln!(out, "  - {} (skill manifest)", SKILL_JSON)?;
    writeln!(out)?;
    writeln!(out, "To use this skill:")?;
    writeln!(out, "1. Make sure `mcpskill` is on PATH (or set MCPSKILL_BIN)")?;
    writeln!(out, "2. Copy the directory to your skills directory:")?;
    writeln!(out, "   cp -r {} ~/.claude/skills/", dir)?;
    writeln!(out)?;
    writeln!(out, "Context savings:")?;
    writeln!(
        out,
        "  Before (MCP): All {} tools preloaded (~{} tokens)",
        summary.tool_count,
        summary.tool_count * TOKENS_PER_TOOL
    )?;
    writeln!(out, "  After (Skill): ~{} tokens until used", SKILL_STUB_TOKENS)?;
    if let Some(reduction) = context_reduction(summary.tool_count) {
        writeln!(out, "  Reduction: ~{}%", reduction)?;
    }
    Ok(())
}
