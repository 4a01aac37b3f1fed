//! Display utilities for the Breathe CLI.
//!
//! This module renders the per-frame widget snapshot as a single updating
//! terminal line, plus the pattern catalog listing and session summaries.

use std::io::{self, Write};

use crate::types::{PatternCatalog, WidgetSnapshot};

/// Width of the indicator bar in characters.
const BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders one frame in place on the current terminal line.
    pub fn show_frame(snapshot: &WidgetSnapshot) {
        print!("\r\x1b[2K{}", Self::format_frame(snapshot));
        let _ = io::stdout().flush();
    }

    /// Shows the pattern catalog.
    pub fn show_patterns(catalog: &PatternCatalog) {
        println!("Available breathing patterns:");
        for pattern in catalog.iter() {
            println!(
                "  {:<12} {:>2}-{}-{}-{}   {}",
                pattern.name,
                pattern.inhale_seconds,
                pattern.hold_seconds,
                pattern.exhale_seconds,
                pattern.rest_seconds,
                pattern.description
            );
        }
    }

    /// Shows the end-of-session summary.
    pub fn show_session_end(snapshot: &WidgetSnapshot) {
        println!();
        match snapshot.completed_cycles {
            0 => println!("Session ended before the first full cycle"),
            1 => println!("Session ended: 1 cycle completed"),
            n => println!("Session ended: {} cycles completed", n),
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats a snapshot as a one-line frame.
    pub fn format_frame(snapshot: &WidgetSnapshot) -> String {
        let bar = Self::scale_bar(snapshot.circle_scale);
        let timer = if snapshot.timer_text.is_empty() {
            "  ".to_string()
        } else {
            format!("{:>2}", snapshot.timer_text)
        };

        format!(
            "{:<12} {} [{}] cycles: {}",
            snapshot.phase_text, timer, bar, snapshot.completed_cycles
        )
    }

    /// Renders the indicator scale as a filled bar.
    fn scale_bar(scale: f64) -> String {
        let filled = ((scale.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
        let mut bar = String::with_capacity(BAR_WIDTH * 3);
        for i in 0..BAR_WIDTH {
            bar.push(if i < filled { '●' } else { '·' });
        }
        bar
    }
}

// ============================================================================
// Tests
// ============================================================================
