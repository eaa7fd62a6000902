//! mcpskill command-line application
//!
//! `generate` turns one MCP server into a skill directory; `exec` is the
//! runtime the generated shim calls into.

pub mod cli;
pub mod commands;
pub mod generator;
pub mod render;

use clap::Parser;
use tracing::debug;

use cli::{Cli, Commands};

/// Initialize tracing with console output on stderr.
///
/// `RUST_LOG` takes precedence; otherwise the workspace crates log at info,
/// or debug with `--verbose`, and dependencies stay at warn.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,mcpskill_core={level},mcpskill_mcp={level},mcpskill_lib={level},mcpskill={level}"
        ))
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Parse arguments, run the selected command, and return the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return 1;
        }
    };

    let ctx = commands::Context {
        session_options: cli.session_options(),
    };
    debug!(session_options = ?ctx.session_options, "Starting mcpskill");

    let result = runtime.block_on(async move {
        match cli.command {
            Commands::Generate(args) => commands::generate::run(args, &ctx).await,
            Commands::Exec(args) => commands::exec::run(args, &ctx).await,
        }
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
