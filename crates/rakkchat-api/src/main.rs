//! rakkchat CLI entry point.
//!
//! Binary name: `rakkchat`
//!
//! Parses CLI arguments, sets up tracing, wires the chat widget to the
//! configured service, then dispatches to the interactive panel or a
//! one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use rakkchat_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "rakkchat", &mut std::io::stdout());
        return Ok(());
    }

    let tracing_options = TracingOptions {
        filter: cli.log_filter().to_string(),
        json: cli.log_json,
        otel: cli.otel,
    };
    init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let state = AppState::init(cli.service_url.clone()).await?;

    let result = match cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,
        Commands::Send { text } => cli::session::send(&state, &text.join(" "), cli.json).await,
        Commands::History => cli::session::history(&state, cli.json).await,
        Commands::Logout => cli::session::logout(&state, cli.json).await,
        Commands::Session => cli::session::show_session(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
