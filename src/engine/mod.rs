//! Engine module for the Breathe widget.
//!
//! This module contains the core widget machinery:
//! - `clock`: 1 Hz phase state machine with countdown and cycle counting
//! - `animation`: per-frame interpolation of the visual indicator
//! - `color`: pattern color parsing and scheme derivation
//! - `widget`: control surface and the dual-ticker run loop

pub mod animation;
pub mod clock;
pub mod color;
pub mod widget;

pub use animation::AnimationDriver;
pub use clock::PhaseClock;
pub use color::{ColorError, ColorScheme, Rgb};
pub use widget::{BreatheWidget, WidgetCommand};
