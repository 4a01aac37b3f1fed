//! Breathe - a breathing-guidance widget for the terminal
//!
//! Walks you through timed breathing cycles:
//! - Pick a pattern (4-7-8, box breathing, ...)
//! - Follow the animated indicator and countdown
//! - Stop with Ctrl-C or after a fixed number of cycles

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use breathe::cli::{Cli, Commands, Display, RunArgs};
use breathe::engine::widget::{BreatheWidget, WidgetCommand};
use breathe::types::PatternCatalog;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(args).await?,
        Some(Commands::Patterns) => {
            Display::show_patterns(&PatternCatalog::default());
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs a guided breathing session until Ctrl-C or the cycle limit.
async fn run_session(args: RunArgs) -> Result<()> {
    let mut widget = BreatheWidget::new(PatternCatalog::default());

    if let Some(name) = &args.pattern {
        if !widget.select_pattern_by_name(name) {
            anyhow::bail!(
                "Unknown pattern '{}'. Run `breathe patterns` to list the available ones.",
                name
            );
        }
    }

    let pattern_name = widget
        .clock()
        .selected_pattern()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    println!("Pattern: {} (Ctrl-C to stop)", pattern_name);

    widget.toggle_breathing();

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();
    let engine = tokio::spawn(widget.run(cmd_rx, frame_tx));

    let mut last_frame = None;
    loop {
        tokio::select! {
            frame = frame_rx.recv() => {
                let Some(frame) = frame else { break };
                Display::show_frame(&frame);

                let limit_reached =
                    args.cycles.is_some_and(|limit| frame.completed_cycles >= limit);
                last_frame = Some(frame);
                if limit_reached {
                    let _ = cmd_tx.send(WidgetCommand::Shutdown);
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                let _ = cmd_tx.send(WidgetCommand::Shutdown);
                break;
            }
        }
    }

    if let Some(frame) = &last_frame {
        Display::show_session_end(frame);
    }

    engine.await??;
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
