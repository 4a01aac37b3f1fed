//! Widget control surface and scheduler.
//!
//! [`BreatheWidget`] ties the phase clock and the animation driver together
//! behind one control surface and runs both periodic sources:
//! - The breathing countdown tick (1 Hz by default)
//! - The animation frame tick (~60 Hz by default)
//!
//! Both tick sources live in a single task, so a countdown tick is always
//! fully applied before the next frame reads the phase. Each frame publishes
//! a [`WidgetSnapshot`] for the presentation layer; commands arrive over a
//! channel and never touch the engine state from another task.

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use crate::engine::animation::AnimationDriver;
use crate::engine::clock::PhaseClock;
use crate::engine::color::ColorScheme;
use crate::types::{PatternCatalog, WidgetConfig, WidgetSnapshot};

// ============================================================================
// WidgetCommand
// ============================================================================

/// Commands accepted by the widget run loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Start if stopped, stop if running
    Toggle,
    /// Select a pattern by catalog name
    SelectPattern(String),
    /// Select the next pattern in catalog order
    NextPattern,
    /// Stop the session and end the run loop
    Shutdown,
}

// ============================================================================
// BreatheWidget
// ============================================================================

/// The breathing widget: phase clock, animation driver, and colors.
#[derive(Debug, Clone)]
pub struct BreatheWidget {
    clock: PhaseClock,
    driver: AnimationDriver,
    colors: ColorScheme,
    config: WidgetConfig,
}

impl BreatheWidget {
    /// Creates a widget over the given catalog with default tick intervals.
    pub fn new(catalog: PatternCatalog) -> Self {
        Self::with_config(catalog, WidgetConfig::default())
    }

    /// Creates a widget with explicit tick intervals.
    pub fn with_config(catalog: PatternCatalog, config: WidgetConfig) -> Self {
        let mut widget = Self {
            clock: PhaseClock::new(catalog),
            driver: AnimationDriver::new(),
            colors: ColorScheme::default(),
            config,
        };
        widget.update_colors();
        widget
    }

    /// Returns the phase clock.
    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    /// Returns the active color scheme.
    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Starts a session if stopped, stops it if running.
    pub fn toggle_breathing(&mut self) {
        self.clock.toggle();
    }

    /// Selects a pattern by catalog index and re-derives the colors.
    pub fn select_pattern(&mut self, index: usize) {
        self.clock.select_pattern(index);
        self.update_colors();
    }

    /// Selects a pattern by name (case-insensitive).
    ///
    /// Returns false when no pattern has that name.
    pub fn select_pattern_by_name(&mut self, name: &str) -> bool {
        match self.clock.catalog().index_of(name) {
            Some(index) => {
                self.select_pattern(index);
                true
            }
            None => {
                debug!(name, "no such pattern");
                false
            }
        }
    }

    /// Selects the next pattern in catalog order, wrapping.
    pub fn advance_next_pattern(&mut self) {
        self.clock.advance_next_pattern();
        self.update_colors();
    }

    /// Re-derives the color scheme from the selected pattern.
    ///
    /// A malformed color identifier keeps the previous scheme; color is
    /// cosmetic and must never fail a tick.
    fn update_colors(&mut self) {
        let Some(pattern) = self.clock.selected_pattern() else {
            return;
        };
        match ColorScheme::for_pattern(pattern) {
            Ok(scheme) => self.colors = scheme,
            Err(e) => warn!(error = %e, "keeping previous colors"),
        }
    }

    // ------------------------------------------------------------------------
    // Ticks and snapshot
    // ------------------------------------------------------------------------

    /// Applies one breathing countdown tick.
    pub fn phase_tick(&mut self) {
        self.clock.tick();
    }

    /// Applies one animation frame tick.
    pub fn frame_tick(&mut self) {
        self.driver.tick(self.clock.phase(), self.clock.is_running());
    }

    /// Publishes the current read-only state.
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            phase: self.clock.phase(),
            phase_text: self.clock.phase_text().to_string(),
            timer_text: self.clock.timer_text(),
            is_running: self.clock.is_running(),
            completed_cycles: self.clock.completed_cycles(),
            pattern_name: self.clock.selected_pattern().map(|p| p.name.clone()),
            circle_scale: self.driver.circle_scale(),
            circle_opacity: self.driver.circle_opacity(),
            ring_rotation: self.driver.ring_rotation(),
            colors: self.colors,
        }
    }

    // ------------------------------------------------------------------------
    // Run loop
    // ------------------------------------------------------------------------

    /// Runs the widget until shutdown.
    ///
    /// Drives both periodic sources and the command channel from one task.
    /// Every frame tick sends a fresh snapshot over `frames`. The loop ends
    /// on [`WidgetCommand::Shutdown`] or when the command channel closes;
    /// both intervals are torn down with it.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<WidgetCommand>,
        frames: mpsc::UnboundedSender<WidgetSnapshot>,
    ) -> Result<()> {
        if let Err(e) = self.config.validate() {
            anyhow::bail!("Invalid widget configuration: {e}");
        }

        let mut phase_ticker = interval(Duration::from_millis(self.config.phase_tick_ms));
        phase_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut frame_ticker = interval(Duration::from_millis(self.config.frame_tick_ms));
        frame_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // The countdown must be applied before a concurrently-ready
                // frame tick reads the phase.
                biased;

                _ = phase_ticker.tick() => {
                    if self.clock.is_running() {
                        self.phase_tick();
                    }
                }
                command = commands.recv() => {
                    match command {
                        Some(WidgetCommand::Toggle) => self.toggle_breathing(),
                        Some(WidgetCommand::SelectPattern(name)) => {
                            self.select_pattern_by_name(&name);
                        }
                        Some(WidgetCommand::NextPattern) => self.advance_next_pattern(),
                        Some(WidgetCommand::Shutdown) | None => {
                            self.clock.stop();
                            break;
                        }
                    }
                }
                _ = frame_ticker.tick() => {
                    self.frame_tick();
                    frames
                        .send(self.snapshot())
                        .context("Failed to send frame snapshot")?;
                }
            }
        }

        Ok(())
    }
}

impl Default for BreatheWidget {
    fn default() -> Self {
        Self::new(PatternCatalog::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::color::Rgb;
    use crate::types::{BreathPhase, BreathingPattern};

    fn widget() -> BreatheWidget {
        BreatheWidget::default()
    }

    // ------------------------------------------------------------------------
    // Command Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_new_widget_is_idle() {
            let widget = widget();
            let snapshot = widget.snapshot();

            assert_eq!(snapshot.phase, BreathPhase::Idle);
            assert!(!snapshot.is_running);
            assert_eq!(snapshot.phase_text, "Tap to start");
            assert_eq!(snapshot.timer_text, "");
            assert_eq!(snapshot.pattern_name.as_deref(), Some("Relaxing"));
        }

        #[test]
        fn test_toggle_breathing() {
            let mut widget = widget();

            widget.toggle_breathing();
            assert!(widget.snapshot().is_running);
            assert_eq!(widget.snapshot().phase, BreathPhase::Inhale);

            widget.toggle_breathing();
            assert!(!widget.snapshot().is_running);
            assert_eq!(widget.snapshot().phase, BreathPhase::Idle);
        }

        #[test]
        fn test_select_pattern_by_name() {
            let mut widget = widget();

            assert!(widget.select_pattern_by_name("box"));
            assert_eq!(widget.snapshot().pattern_name.as_deref(), Some("Box"));
        }

        #[test]
        fn test_select_pattern_by_unknown_name() {
            let mut widget = widget();

            assert!(!widget.select_pattern_by_name("nope"));
            assert_eq!(widget.snapshot().pattern_name.as_deref(), Some("Relaxing"));
        }

        #[test]
        fn test_advance_next_pattern_updates_colors() {
            let mut widget = widget();

            widget.advance_next_pattern();

            // Box colors
            assert_eq!(widget.colors().circle_start, Rgb::new(102, 126, 234));
            assert_eq!(widget.colors().circle_end, Rgb::new(90, 103, 216));
        }
    }

    // ------------------------------------------------------------------------
    // Color Policy Tests
    // ------------------------------------------------------------------------

    mod color_tests {
        use super::*;

        fn catalog_with_bad_colors() -> PatternCatalog {
            PatternCatalog::new(vec![
                BreathingPattern::new("Good", "", 4, 0, 4, 0, "#4FD1C5", "#38B2AC"),
                BreathingPattern::new("Bad", "", 4, 0, 4, 0, "not-a-color", "#38B2AC"),
            ])
        }

        #[test]
        fn test_colors_applied_on_construction() {
            let widget = widget();
            // Relaxing start color
            assert_eq!(widget.colors().circle_start, Rgb::new(79, 209, 197));
            assert_eq!(widget.colors().background_bottom, Rgb::new(19, 52, 49));
        }

        #[test]
        fn test_malformed_color_keeps_previous_scheme() {
            let mut widget = BreatheWidget::new(catalog_with_bad_colors());
            let before = *widget.colors();

            widget.select_pattern(1);

            assert_eq!(widget.snapshot().pattern_name.as_deref(), Some("Bad"));
            assert_eq!(*widget.colors(), before);
        }

        #[test]
        fn test_malformed_color_does_not_stop_session() {
            let mut widget = BreatheWidget::new(catalog_with_bad_colors());
            widget.toggle_breathing();

            widget.select_pattern(1);

            assert!(widget.snapshot().is_running);
            assert_eq!(widget.snapshot().phase, BreathPhase::Inhale);
        }
    }

    // ------------------------------------------------------------------------
    // Tick / Snapshot Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_phase_tick_advances_countdown() {
            let mut widget = widget();
            widget.toggle_breathing();

            widget.phase_tick();

            assert_eq!(widget.snapshot().timer_text, "3");
        }

        #[test]
        fn test_frame_tick_moves_animation() {
            let mut widget = widget();

            widget.frame_tick();

            let snapshot = widget.snapshot();
            assert!(snapshot.ring_rotation > 0.0);
        }

        #[test]
        fn test_snapshot_tracks_cycles() {
            let mut widget = widget();
            widget.select_pattern(2); // Calming 5-0-5
            widget.toggle_breathing();

            for _ in 0..10 {
                widget.phase_tick();
            }

            assert_eq!(widget.snapshot().completed_cycles, 1);
        }

        #[test]
        fn test_snapshot_serializes() {
            let widget = widget();
            let json = serde_json::to_string(&widget.snapshot()).unwrap();
            assert!(json.contains("\"phase\":\"idle\""));
            assert!(json.contains("\"is_running\":false"));
        }
    }

    // ------------------------------------------------------------------------
    // Run Loop Tests
    // ------------------------------------------------------------------------

    mod run_loop_tests {
        use super::*;
        use tokio::time::timeout;

        fn fast_config() -> WidgetConfig {
            WidgetConfig {
                phase_tick_ms: 20,
                frame_tick_ms: 5,
            }
        }

        #[tokio::test]
        async fn test_run_emits_frames() {
            let widget = BreatheWidget::with_config(PatternCatalog::default(), fast_config());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(widget.run(cmd_rx, frame_tx));

            let frame = timeout(Duration::from_secs(1), frame_rx.recv())
                .await
                .expect("expected a frame within 1s")
                .expect("frame channel closed");
            assert_eq!(frame.phase, BreathPhase::Idle);

            cmd_tx.send(WidgetCommand::Shutdown).unwrap();
            let result = timeout(Duration::from_secs(1), handle).await.unwrap();
            assert!(result.unwrap().is_ok());
        }

        #[tokio::test]
        async fn test_run_toggle_starts_session() {
            let widget = BreatheWidget::with_config(PatternCatalog::default(), fast_config());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(widget.run(cmd_rx, frame_tx));
            cmd_tx.send(WidgetCommand::Toggle).unwrap();

            let frame = timeout(Duration::from_secs(1), async {
                loop {
                    let frame: WidgetSnapshot = frame_rx.recv().await.expect("channel closed");
                    if frame.is_running {
                        return frame;
                    }
                }
            })
            .await
            .expect("expected a running frame within 1s");

            assert_eq!(frame.phase, BreathPhase::Inhale);
            assert_eq!(frame.phase_text, "Breathe In");

            cmd_tx.send(WidgetCommand::Shutdown).unwrap();
            handle.abort();
        }

        #[tokio::test]
        async fn test_run_select_pattern_command() {
            let widget = BreatheWidget::with_config(PatternCatalog::default(), fast_config());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(widget.run(cmd_rx, frame_tx));
            cmd_tx
                .send(WidgetCommand::SelectPattern("Sleep".to_string()))
                .unwrap();

            let frame = timeout(Duration::from_secs(1), async {
                loop {
                    let frame: WidgetSnapshot = frame_rx.recv().await.expect("channel closed");
                    if frame.pattern_name.as_deref() == Some("Sleep") {
                        return frame;
                    }
                }
            })
            .await
            .expect("expected the Sleep pattern within 1s");

            assert!(!frame.is_running);

            cmd_tx.send(WidgetCommand::Shutdown).unwrap();
            handle.abort();
        }

        #[tokio::test]
        async fn test_run_ends_when_command_channel_closes() {
            let widget = BreatheWidget::with_config(PatternCatalog::default(), fast_config());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (frame_tx, _frame_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(widget.run(cmd_rx, frame_tx));
            drop(cmd_tx);

            let result = timeout(Duration::from_secs(1), handle).await.unwrap();
            assert!(result.unwrap().is_ok());
        }

        #[tokio::test]
        async fn test_run_countdown_advances() {
            let widget = BreatheWidget::with_config(PatternCatalog::default(), fast_config());
            let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
            let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();

            let handle = tokio::spawn(widget.run(cmd_rx, frame_tx));
            cmd_tx.send(WidgetCommand::Toggle).unwrap();

            // Relaxing starts with a 4 second inhale; at 20ms phase ticks
            // the countdown should drop below 4 well within a second.
            let frame = timeout(Duration::from_secs(2), async {
                loop {
                    let frame: WidgetSnapshot = frame_rx.recv().await.expect("channel closed");
                    if frame.is_running && !frame.timer_text.is_empty() && frame.timer_text != "4" {
                        return frame;
                    }
                }
            })
            .await
            .expect("expected the countdown to advance");

            assert!(frame.timer_text.parse::<u32>().unwrap() < 4);

            cmd_tx.send(WidgetCommand::Shutdown).unwrap();
            handle.abort();
        }
    }
}
