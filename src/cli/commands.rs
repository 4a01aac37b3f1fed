//! Command definitions for the Breathe CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Breathe - a breathing-guidance widget for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "breathe",
    version,
    about = "Guided breathing sessions in your terminal",
    long_about = "A breathing-guidance widget that walks you through timed \
                  inhale/hold/exhale/rest cycles\nwith a smoothly animated \
                  indicator. Pick a pattern, press Ctrl-C to stop.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a guided breathing session
    Run(RunArgs),

    /// List the available breathing patterns
    Patterns,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Breathing pattern to use (see `breathe patterns`)
    #[arg(short, long, value_name = "NAME")]
    pub pattern: Option<String>,

    /// Stop automatically after this many completed cycles
    #[arg(short, long, value_name = "N")]
    pub cycles: Option<u32>,
}

// ============================================================================
// Tests
// ============================================================================
