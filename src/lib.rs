//! Breathe Widget Library
//!
//! This library provides the core functionality for the Breathe terminal
//! widget. It includes:
//! - Phase clock for the timed breathing cycle (inhale/hold/exhale/rest)
//! - Animation driver easing the visual indicator toward phase targets
//! - Pattern catalog with the built-in breathing techniques
//! - Color parsing and indicator scheme derivation
//! - CLI command parsing and terminal display utilities

pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{
    AnimationDriver, BreatheWidget, ColorError, ColorScheme, PhaseClock, Rgb, WidgetCommand,
};
pub use types::{BreathPhase, BreathingPattern, PatternCatalog, WidgetConfig, WidgetSnapshot};
