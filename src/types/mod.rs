//! Core data types for the Breathe widget.
//!
//! This module defines the data structures used for:
//! - The discrete breathing phases
//! - Breathing pattern definitions with validation
//! - The fixed pattern catalog
//! - Widget tick configuration
//! - The read-only snapshot published to the presentation layer

use serde::{Deserialize, Serialize};

use crate::engine::color::ColorScheme;

// ============================================================================
// BreathPhase
// ============================================================================

/// Represents the current phase of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    /// Not breathing; the widget shows the idle pulse
    Idle,
    /// Breathing in
    Inhale,
    /// Holding after the inhale
    Hold,
    /// Breathing out
    Exhale,
    /// Resting after the exhale
    Rest,
}

impl BreathPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreathPhase::Idle => "idle",
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
            BreathPhase::Rest => "rest",
        }
    }

    /// Returns the label shown to the user while this phase is active.
    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Idle => "Tap to start",
            BreathPhase::Inhale => "Breathe In",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Breathe Out",
            BreathPhase::Rest => "Rest",
        }
    }

    /// Returns true if this phase is part of an active breathing cycle.
    pub fn is_active(&self) -> bool {
        !matches!(self, BreathPhase::Idle)
    }
}

impl Default for BreathPhase {
    fn default() -> Self {
        BreathPhase::Idle
    }
}

// ============================================================================
// BreathingPattern
// ============================================================================

/// A named breathing pattern: per-phase durations plus indicator colors.
///
/// A duration of zero means that phase is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Inhale duration in seconds
    pub inhale_seconds: u32,
    /// Hold duration in seconds (0 = skip)
    pub hold_seconds: u32,
    /// Exhale duration in seconds
    pub exhale_seconds: u32,
    /// Rest duration in seconds (0 = skip)
    pub rest_seconds: u32,
    /// Gradient start color as a `#RRGGBB` string
    pub color_start: String,
    /// Gradient end color as a `#RRGGBB` string
    pub color_end: String,
}

impl BreathingPattern {
    /// Creates a new pattern with the given name, durations, and colors.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        inhale_seconds: u32,
        hold_seconds: u32,
        exhale_seconds: u32,
        rest_seconds: u32,
        color_start: impl Into<String>,
        color_end: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inhale_seconds,
            hold_seconds,
            exhale_seconds,
            rest_seconds,
            color_start: color_start.into(),
            color_end: color_end.into(),
        }
    }

    /// Returns the duration of one full cycle in seconds.
    pub fn total_cycle_seconds(&self) -> u32 {
        self.inhale_seconds + self.hold_seconds + self.exhale_seconds + self.rest_seconds
    }

    /// Returns the duration of the given phase in seconds.
    ///
    /// Idle has no duration and returns 0.
    pub fn phase_seconds(&self, phase: BreathPhase) -> u32 {
        match phase {
            BreathPhase::Idle => 0,
            BreathPhase::Inhale => self.inhale_seconds,
            BreathPhase::Hold => self.hold_seconds,
            BreathPhase::Exhale => self.exhale_seconds,
            BreathPhase::Rest => self.rest_seconds,
        }
    }

    /// Validates the pattern.
    ///
    /// Returns an error message if validation fails. A pattern with all
    /// durations at zero has no valid cycle.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Pattern name must not be empty".to_string());
        }
        if self.total_cycle_seconds() == 0 {
            return Err(format!(
                "Pattern '{}' must have at least one phase duration greater than zero",
                self.name
            ));
        }
        Ok(())
    }
}

// ============================================================================
// PatternCatalog
// ============================================================================

/// The fixed, ordered list of patterns available to the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCatalog {
    patterns: Vec<BreathingPattern>,
}

impl PatternCatalog {
    /// Creates a catalog from the given pattern list.
    pub fn new(patterns: Vec<BreathingPattern>) -> Self {
        Self { patterns }
    }

    /// Returns the pattern at the given index.
    pub fn get(&self, index: usize) -> Option<&BreathingPattern> {
        self.patterns.get(index)
    }

    /// Returns the index of the pattern with the given name
    /// (case-insensitive).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.patterns
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the number of patterns in the catalog.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the catalog has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterates over the patterns in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BreathingPattern> {
        self.patterns.iter()
    }
}

impl Default for PatternCatalog {
    /// The built-in set of five patterns.
    fn default() -> Self {
        Self::new(vec![
            BreathingPattern::new(
                "Relaxing",
                "4-7-8 technique for deep relaxation",
                4,
                7,
                8,
                0,
                "#4FD1C5",
                "#38B2AC",
            ),
            BreathingPattern::new(
                "Box",
                "4-4-4-4 box breathing for focus",
                4,
                4,
                4,
                4,
                "#667EEA",
                "#5A67D8",
            ),
            BreathingPattern::new(
                "Calming",
                "5-5 simple breathing for calm",
                5,
                0,
                5,
                0,
                "#9F7AEA",
                "#805AD5",
            ),
            BreathingPattern::new(
                "Energizing",
                "4-0-4 quick breaths for energy",
                4,
                0,
                4,
                0,
                "#F6AD55",
                "#ED8936",
            ),
            BreathingPattern::new(
                "Sleep",
                "4-7-8 extended for sleep preparation",
                4,
                7,
                8,
                2,
                "#4A5568",
                "#2D3748",
            ),
        ])
    }
}

// ============================================================================
// WidgetConfig
// ============================================================================

/// Tick configuration for the widget's two periodic sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Interval of the breathing countdown tick in milliseconds
    pub phase_tick_ms: u64,
    /// Interval of the animation frame tick in milliseconds (~60 FPS)
    pub frame_tick_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            phase_tick_ms: 1000,
            frame_tick_ms: 16,
        }
    }
}

impl WidgetConfig {
    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.phase_tick_ms < 1 {
            return Err("Phase tick interval must be at least 1ms".to_string());
        }
        if self.frame_tick_ms < 1 {
            return Err("Frame tick interval must be at least 1ms".to_string());
        }
        if self.frame_tick_ms > self.phase_tick_ms {
            return Err(
                "Frame tick interval must not be longer than the phase tick interval".to_string(),
            );
        }
        Ok(())
    }
}

// ============================================================================
// WidgetSnapshot
// ============================================================================

/// Read-only view of the widget state, published once per animation frame.
///
/// The presentation layer renders this and never reaches back into the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    /// Current breathing phase
    pub phase: BreathPhase,
    /// Human-readable phase label
    pub phase_text: String,
    /// Remaining seconds as text, empty when not counting
    pub timer_text: String,
    /// Whether a breathing session is running
    pub is_running: bool,
    /// Completed cycle count for the current session
    pub completed_cycles: u32,
    /// Name of the selected pattern, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_name: Option<String>,
    /// Indicator scale
    pub circle_scale: f64,
    /// Indicator opacity
    pub circle_opacity: f64,
    /// Outer ring rotation in degrees
    pub ring_rotation: f64,
    /// Indicator and background colors
    pub colors: ColorScheme,
}

// ============================================================================
// Tests
// ============================================================================
