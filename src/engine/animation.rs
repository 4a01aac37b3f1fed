//! Animation driver for the Breathe widget.
//!
//! This module provides the continuous half of the engine: per-frame easing
//! of the indicator scale toward a phase-dependent target, a sinusoidal
//! opacity pulse, a slow ring rotation, and a gentle idle pulse while no
//! session is running.
//!
//! The tuning constants below are cosmetic. Their relative proportions
//! matter (the inhale eases faster than the exhale); the exact values do
//! not.

use crate::types::BreathPhase;

/// Accumulator increment per animation frame.
const PHASE_STEP: f64 = 0.02;

/// Degrees of ring rotation per accumulator unit.
const ROTATION_RATE: f64 = 30.0;

/// Scale the indicator grows toward while breathing in or holding.
const SCALE_EXPANDED: f64 = 1.0;

/// Scale the indicator shrinks toward while breathing out or resting.
const SCALE_CONTRACTED: f64 = 0.4;

/// Neutral midpoint scale, also the center of the idle pulse.
const SCALE_NEUTRAL: f64 = 0.5;

/// Per-frame easing factor while inhaling.
const EASE_INHALE: f64 = 0.030;

/// Per-frame easing factor while exhaling.
const EASE_EXHALE: f64 = 0.024;

/// Per-frame easing factor for the hold and rest phases.
const EASE_DEFAULT: f64 = 0.020;

// ============================================================================
// AnimationDriver
// ============================================================================

/// Continuous visual state, advanced once per animation frame (~60 Hz).
///
/// The driver reads the phase clock's published phase each frame and owns
/// its own state exclusively; nothing writes back into the clock.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    /// Monotonic accumulator driving the pulses and rotation
    animation_phase: f64,
    /// Indicator scale
    circle_scale: f64,
    /// Indicator opacity
    circle_opacity: f64,
    /// Outer ring rotation in degrees
    ring_rotation: f64,
}

impl AnimationDriver {
    /// Creates a driver at the neutral resting state.
    pub fn new() -> Self {
        Self {
            animation_phase: 0.0,
            circle_scale: SCALE_NEUTRAL,
            circle_opacity: 0.6,
            ring_rotation: 0.0,
        }
    }

    /// Returns the indicator scale.
    pub fn circle_scale(&self) -> f64 {
        self.circle_scale
    }

    /// Returns the indicator opacity.
    pub fn circle_opacity(&self) -> f64 {
        self.circle_opacity
    }

    /// Returns the ring rotation in degrees, within `[0, 360)`.
    pub fn ring_rotation(&self) -> f64 {
        self.ring_rotation
    }

    /// Advances the animation by one frame.
    ///
    /// The ring rotates regardless of running state. While stopped, scale
    /// and opacity follow a gentle sinusoidal idle pulse. While running,
    /// the scale eases exponentially toward the phase target and never
    /// snaps, even across a phase boundary.
    pub fn tick(&mut self, phase: BreathPhase, is_running: bool) {
        self.animation_phase += PHASE_STEP;
        self.ring_rotation = (self.animation_phase * ROTATION_RATE).rem_euclid(360.0);

        if !is_running {
            // Idle pulse: two different frequencies so scale and opacity
            // drift independently.
            self.circle_scale = SCALE_NEUTRAL + (self.animation_phase * 2.0).sin() * 0.05;
            self.circle_opacity = 0.6 + (self.animation_phase * 3.0).sin() * 0.1;
            return;
        }

        let target_scale = match phase {
            BreathPhase::Inhale | BreathPhase::Hold => SCALE_EXPANDED,
            BreathPhase::Exhale | BreathPhase::Rest => SCALE_CONTRACTED,
            BreathPhase::Idle => SCALE_NEUTRAL,
        };

        let speed = match phase {
            BreathPhase::Inhale => EASE_INHALE,
            BreathPhase::Exhale => EASE_EXHALE,
            _ => EASE_DEFAULT,
        };

        self.circle_scale += (target_scale - self.circle_scale) * speed;
        self.circle_opacity = 0.7 + (self.animation_phase * 4.0).sin() * 0.15;
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> AnimationDriver {
        AnimationDriver::new()
    }

    #[test]
    fn test_new_starts_neutral() {
        let driver = driver();
        assert_eq!(driver.circle_scale(), 0.5);
        assert_eq!(driver.circle_opacity(), 0.6);
        assert_eq!(driver.ring_rotation(), 0.0);
    }

    #[test]
    fn test_ring_rotates_while_idle_and_running() {
        let mut driver = driver();

        driver.tick(BreathPhase::Idle, false);
        let idle_rotation = driver.ring_rotation();
        assert!(idle_rotation > 0.0);

        driver.tick(BreathPhase::Inhale, true);
        assert!(driver.ring_rotation() > idle_rotation);
    }

    #[test]
    fn test_ring_rotation_wraps_below_360() {
        let mut driver = driver();
        // 0.02 * 30 = 0.6 degrees per frame; 1000 frames exceed one turn
        for _ in 0..1000 {
            driver.tick(BreathPhase::Idle, false);
        }
        assert!(driver.ring_rotation() >= 0.0);
        assert!(driver.ring_rotation() < 360.0);
    }

    #[test]
    fn test_idle_pulse_stays_near_neutral() {
        let mut driver = driver();
        for _ in 0..2000 {
            driver.tick(BreathPhase::Idle, false);
            assert!(driver.circle_scale() >= 0.45 && driver.circle_scale() <= 0.55);
            assert!(driver.circle_opacity() >= 0.5 && driver.circle_opacity() <= 0.7);
        }
    }

    #[test]
    fn test_inhale_grows_toward_expanded() {
        let mut driver = driver();
        let start = driver.circle_scale();

        for _ in 0..100 {
            driver.tick(BreathPhase::Inhale, true);
        }

        assert!(driver.circle_scale() > start);
        assert!(driver.circle_scale() < 1.0);
    }

    #[test]
    fn test_exhale_shrinks_toward_contracted() {
        let mut driver = driver();
        // Inflate first
        for _ in 0..300 {
            driver.tick(BreathPhase::Inhale, true);
        }
        let inflated = driver.circle_scale();

        for _ in 0..100 {
            driver.tick(BreathPhase::Exhale, true);
        }

        assert!(driver.circle_scale() < inflated);
        assert!(driver.circle_scale() > 0.4);
    }

    #[test]
    fn test_inhale_eases_faster_than_exhale() {
        // Symmetric distances: inhale from 0.5 toward 1.0, exhale from
        // 0.9 toward 0.4. The inhale should close more of the gap per frame.
        let mut inhale = driver();
        inhale.tick(BreathPhase::Inhale, true);
        let inhale_progress = inhale.circle_scale() - 0.5;

        let mut exhale = driver();
        for _ in 0..2000 {
            exhale.tick(BreathPhase::Inhale, true);
        }
        let from = exhale.circle_scale();
        exhale.tick(BreathPhase::Exhale, true);
        let exhale_progress = from - exhale.circle_scale();

        let inhale_rate = inhale_progress / 0.5;
        let exhale_rate = exhale_progress / (from - 0.4);
        assert!(inhale_rate > exhale_rate);
    }

    #[test]
    fn test_no_snap_across_phase_boundary() {
        let mut driver = driver();
        for _ in 0..200 {
            driver.tick(BreathPhase::Inhale, true);
        }
        let before = driver.circle_scale();

        // Target flips from 1.0 to 0.4; the value must migrate gradually
        driver.tick(BreathPhase::Exhale, true);
        let after = driver.circle_scale();

        assert!((before - after).abs() < 0.05);
    }

    #[test]
    fn test_scale_bounded_over_ten_thousand_ticks() {
        let phases = [
            BreathPhase::Inhale,
            BreathPhase::Hold,
            BreathPhase::Exhale,
            BreathPhase::Rest,
        ];

        let mut driver = driver();
        for i in 0..10_000 {
            // Rotate through phases to exercise every target/speed pair
            let phase = phases[(i / 250) % phases.len()];
            driver.tick(phase, true);
            assert!(
                (0.0..=1.0).contains(&driver.circle_scale()),
                "scale {} out of bounds at tick {}",
                driver.circle_scale(),
                i
            );
        }
    }

    #[test]
    fn test_running_opacity_pulse_range() {
        let mut driver = driver();
        for _ in 0..2000 {
            driver.tick(BreathPhase::Inhale, true);
            assert!(driver.circle_opacity() >= 0.55);
            assert!(driver.circle_opacity() <= 0.85);
        }
    }

    #[test]
    fn test_idle_target_seeking_disabled() {
        let mut driver = driver();
        // Pump the scale up, then go idle: the idle pulse takes over
        // absolutely instead of easing back.
        for _ in 0..500 {
            driver.tick(BreathPhase::Inhale, true);
        }
        driver.tick(BreathPhase::Idle, false);

        assert!(driver.circle_scale() <= 0.55);
    }
}
