//! Drag handling for the sheet.
//!
//! While a drag is active the tracker is the only writer of the position and
//! overscroll channels. The sheet follows the finger 1:1; dragging above the
//! resting anchor grows the overscroll backfill instead of exposing whatever
//! is behind the sheet.

use slidesheet_foundation::GestureSample;

use super::channels::SheetChannels;
use super::config::DISMISS_THRESHOLD_FRACTION;
use super::layout::finite_or_zero;

/// Outcome of a completed drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseDecision {
    pub should_dismiss: bool,
    /// Vertical offset of the sheet from its resting anchor at release.
    pub offset: f32,
    pub threshold: f32,
    /// Release velocity in logical pixels per second, positive downward.
    pub velocity: f32,
}

impl ReleaseDecision {
    /// A decision that always returns the sheet to rest.
    pub fn retain(offset: f32, velocity: f32) -> Self {
        Self {
            should_dismiss: false,
            offset,
            threshold: 0.0,
            velocity,
        }
    }
}

/// Decide whether a drag released at `offset` dismisses the sheet.
///
/// The threshold is 10% of the measured content height. Until content has
/// been measured the threshold is zero, so any downward release dismisses.
/// A persistent sheet is never dismissed, whatever the offset.
pub fn release_decision(
    offset: f32,
    content_height: f32,
    persistent: bool,
    velocity: f32,
) -> ReleaseDecision {
    let threshold = finite_or_zero(content_height).max(0.0) * DISMISS_THRESHOLD_FRACTION;
    ReleaseDecision {
        should_dismiss: offset > threshold && !persistent,
        offset,
        threshold,
        velocity,
    }
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    active: bool,
    /// Accumulated drag offset from the zero baseline.
    offset: f32,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Take ownership of the drag channels.
    ///
    /// Anything still animating them (a previous snap-back) is stopped where it
    /// is. Returns `false` if a drag is already active.
    pub fn begin(&mut self, channels: &SheetChannels) -> bool {
        if self.active {
            log::trace!("overlapping drag begin ignored");
            return false;
        }
        channels.position.stop();
        channels.overscroll_height.stop();
        self.active = true;
        self.offset = 0.0;
        true
    }

    pub fn update(&mut self, sample: GestureSample, channels: &SheetChannels) -> bool {
        if !self.active {
            log::trace!("drag update without begin ignored");
            return false;
        }
        let delta_y = finite_or_zero(sample.delta_y);
        self.offset = delta_y;
        channels.position.snap_to(delta_y);
        // Downward motion leaves the backfill alone; it is reset on release.
        if delta_y <= 0.0 {
            channels.overscroll_height.snap_to(delta_y.abs());
        }
        true
    }

    /// Finish the drag and decide its outcome.
    ///
    /// Returns `None` when no drag was active. The accumulated offset is
    /// flattened so the next drag starts from the zero baseline; restoring the
    /// channels is left to whoever acts on the decision.
    pub fn end(
        &mut self,
        velocity: f32,
        content_height: f32,
        persistent: bool,
        channels: &SheetChannels,
    ) -> Option<ReleaseDecision> {
        if !self.active {
            log::trace!("drag end without begin ignored");
            return None;
        }
        let offset = channels.position.value();
        let velocity = finite_or_zero(velocity);
        let decision = release_decision(offset, content_height, persistent, velocity);
        self.active = false;
        self.offset = 0.0;
        log::debug!(
            "drag released at {:.1} (threshold {:.1}): {}",
            decision.offset,
            decision.threshold,
            if decision.should_dismiss { "dismiss" } else { "snap back" }
        );
        Some(decision)
    }

    /// Abandon an active drag without a decision.
    pub fn cancel(&mut self) {
        self.active = false;
        self.offset = 0.0;
    }

    /// Zero the gesture's reference frame and the backfill it produced.
    pub fn reset(&mut self, channels: &SheetChannels) {
        self.cancel();
        channels.overscroll_height.snap_to(0.0);
    }
}

#[cfg(test)]
#[path = "../tests/gesture_tracker_tests.rs"]
mod tests;
