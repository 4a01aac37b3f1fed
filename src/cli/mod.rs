//! CLI module for the Breathe widget.
//!
//! This module contains:
//! - `commands`: clap command definitions
//! - `display`: terminal rendering of frames and listings

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
