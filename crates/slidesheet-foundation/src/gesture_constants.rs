//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels. The drag recogniser and the scrim tap
//! recogniser share one slop so a press is always exactly one of "tap" or
//! "drag", never both.

/// Distance a pointer must travel from its press position before a press
/// becomes a drag (and stops being a tap).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Release velocities are clamped to this many logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Only samples this recent contribute to the release velocity estimate.
pub const VELOCITY_WINDOW_MILLIS: u64 = 100;
