//! `mcpskill generate` - write a skill directory for one MCP server

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use mcpskill_core::EventBus;

use super::Context;
use crate::generator::SkillGenerator;
use crate::render;

/// Arguments for `mcpskill generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to MCP server configuration JSON
    #[arg(long, value_name = "PATH")]
    pub mcp_config: PathBuf,

    /// Output directory for the generated skill
    #[arg(long, value_name = "PATH")]
    pub output_dir: PathBuf,
}

pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let bus = EventBus::new();
    let mut events = bus.subscribe();

    let generator = SkillGenerator::new(&args.mcp_config, &args.output_dir, bus.sender())?
        .with_session_options(ctx.session_options.clone());

    let printer = tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        while let Some(event) = events.recv().await {
            // Progress output is best effort
            let _ = render::render_event(&mut stdout, &event);
        }
    });

    let result = generator.generate().await;

    // Dropping every sender ends the printer loop after the last event
    drop(generator);
    drop(bus);
    printer.await.context("Progress printer task failed")?;

    let summary = result?;
    render::render_summary(&mut std::io::stdout(), &summary)?;
    Ok(())
}
