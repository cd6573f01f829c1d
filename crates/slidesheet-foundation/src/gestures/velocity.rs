//! Release velocity estimation.

use smallvec::SmallVec;

use crate::gesture_constants::{MAX_FLING_VELOCITY, VELOCITY_WINDOW_MILLIS};

/// Estimates vertical velocity from the most recent pointer samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(u64, f32); 16]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, uptime_millis: u64, y: f32) {
        // Out-of-order timestamps restart the estimate.
        if self
            .samples
            .last()
            .is_some_and(|&(last, _)| uptime_millis < last)
        {
            self.samples.clear();
        }
        self.samples.push((uptime_millis, y));
        let horizon = uptime_millis.saturating_sub(VELOCITY_WINDOW_MILLIS);
        self.samples.retain(|&mut (time, _)| time >= horizon);
    }

    /// Logical pixels per second, positive downward, clamped to
    /// [`MAX_FLING_VELOCITY`].
    pub fn velocity_y(&self) -> f32 {
        let (Some(&(first_time, first_y)), Some(&(last_time, last_y))) =
            (self.samples.first(), self.samples.last())
        else {
            return 0.0;
        };
        if last_time <= first_time {
            return 0.0;
        }
        let seconds = (last_time - first_time) as f32 / 1000.0;
        ((last_y - first_y) / seconds).clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
