//! Phase clock for the Breathe widget.
//!
//! This module provides the discrete half of the engine:
//! - The 1 Hz countdown over the selected pattern's phase durations
//! - Phase transitions with zero-duration phases skipped
//! - Cycle counting each time the sequence returns to Inhale
//! - Start/stop/select/advance control operations
//!
//! Every operation is a silent no-op while no pattern is selected; an empty
//! selection is a valid quiescent state, not a fault.

use tracing::{debug, info};

use crate::types::{BreathPhase, BreathingPattern, PatternCatalog};

// ============================================================================
// PhaseClock
// ============================================================================

/// State machine that owns the breathing-phase sequence and countdown.
///
/// The clock is driven externally: the widget run loop calls [`tick`]
/// once per second while a session is running.
///
/// [`tick`]: PhaseClock::tick
#[derive(Debug, Clone)]
pub struct PhaseClock {
    /// Available patterns, in fixed order
    catalog: PatternCatalog,
    /// Index of the selected pattern; `None` means nothing to start
    selected: Option<usize>,
    /// Current breathing phase
    phase: BreathPhase,
    /// Seconds left in the current phase
    phase_time_remaining: u32,
    /// Cycles completed since the session started
    cycle_count: u32,
    /// Whether a session is running
    running: bool,
}

impl PhaseClock {
    /// Creates a clock over the given catalog.
    ///
    /// The first pattern is pre-selected when the catalog is non-empty.
    pub fn new(catalog: PatternCatalog) -> Self {
        let selected = if catalog.is_empty() { None } else { Some(0) };
        Self {
            catalog,
            selected,
            phase: BreathPhase::Idle,
            phase_time_remaining: 0,
            cycle_count: 0,
            running: false,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the current breathing phase.
    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Returns true if a session is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the number of cycles completed in the current session.
    pub fn completed_cycles(&self) -> u32 {
        self.cycle_count
    }

    /// Returns the seconds left in the current phase.
    pub fn phase_time_remaining(&self) -> u32 {
        self.phase_time_remaining
    }

    /// Returns the selected pattern, if any.
    pub fn selected_pattern(&self) -> Option<&BreathingPattern> {
        self.catalog.get(self.selected?)
    }

    /// Returns the index of the selected pattern, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the pattern catalog.
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Returns the label for the current phase.
    ///
    /// Pure derivation from the phase alone.
    pub fn phase_text(&self) -> &'static str {
        self.phase.label()
    }

    /// Returns the remaining seconds as display text.
    ///
    /// Empty while stopped or once the countdown has run out.
    pub fn timer_text(&self) -> String {
        if self.running && self.phase_time_remaining > 0 {
            self.phase_time_remaining.to_string()
        } else {
            String::new()
        }
    }

    // ------------------------------------------------------------------------
    // Control operations
    // ------------------------------------------------------------------------

    /// Starts a breathing session from the top of the cycle.
    ///
    /// No-op when nothing is selected or a session is already running.
    pub fn start(&mut self) {
        let Some(pattern) = self.selected_pattern() else {
            return;
        };
        if self.running {
            return;
        }

        let name = pattern.name.clone();
        self.running = true;
        self.cycle_count = 0;
        self.enter_phase(BreathPhase::Inhale);

        info!(pattern = %name, "started breathing pattern");
    }

    /// Stops the session and returns to the idle state. Idempotent.
    pub fn stop(&mut self) {
        if !self.running && self.phase == BreathPhase::Idle {
            return;
        }

        self.running = false;
        self.phase = BreathPhase::Idle;
        self.phase_time_remaining = 0;

        info!("stopped breathing");
    }

    /// Starts the session if stopped, stops it if running.
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Selects the pattern at the given catalog index.
    ///
    /// A running session restarts from Inhale under the new pattern; there is
    /// no mid-phase carryover. An out-of-range index is ignored.
    pub fn select_pattern(&mut self, index: usize) {
        if self.catalog.get(index).is_none() {
            debug!(index, "ignoring selection of unknown pattern");
            return;
        }

        let was_running = self.running;
        if was_running {
            self.stop();
        }
        self.selected = Some(index);
        if was_running {
            self.start();
        }
    }

    /// Selects the pattern following the current one, wrapping past the end.
    pub fn advance_next_pattern(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        self.select_pattern((index + 1) % self.catalog.len());
    }

    // ------------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------------

    /// Advances the countdown by one second.
    ///
    /// At zero the clock moves to the next phase, skipping phases whose
    /// configured duration is zero, and counts a cycle when the sequence
    /// lands back on Inhale.
    pub fn tick(&mut self) {
        let Some(pattern) = self.selected_pattern() else {
            return;
        };
        if !self.running {
            return;
        }

        let hold = pattern.hold_seconds;
        let rest = pattern.rest_seconds;

        self.phase_time_remaining = self.phase_time_remaining.saturating_sub(1);
        if self.phase_time_remaining > 0 {
            return;
        }

        let next = match self.phase {
            BreathPhase::Inhale if hold > 0 => BreathPhase::Hold,
            BreathPhase::Inhale => BreathPhase::Exhale,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale if rest > 0 => BreathPhase::Rest,
            BreathPhase::Exhale => BreathPhase::Inhale,
            BreathPhase::Rest | BreathPhase::Idle => BreathPhase::Inhale,
        };

        if next == BreathPhase::Inhale {
            self.cycle_count += 1;
            debug!(cycles = self.cycle_count, "completed breathing cycle");
        }

        self.enter_phase(next);
    }

    /// Enters a phase, re-deriving the countdown from the pattern.
    fn enter_phase(&mut self, phase: BreathPhase) {
        let duration = self
            .selected_pattern()
            .map(|p| p.phase_seconds(phase))
            .unwrap_or(0);

        self.phase = phase;
        self.phase_time_remaining = duration;

        debug!(phase = phase.as_str(), seconds = duration, "entered phase");
    }
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new(PatternCatalog::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
