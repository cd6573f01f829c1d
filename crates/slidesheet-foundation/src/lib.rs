//! Pointer input types and gesture recognisers.
//!
//! Recognisers here know nothing about sheets: they turn raw pointer events
//! into drag samples, release velocities, and taps.

pub mod gesture_constants;
pub mod gestures;
pub mod input;

pub use gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY, VELOCITY_WINDOW_MILLIS};
pub use gestures::{DragEvent, DragGesture, GestureSample, TapGesture, VelocityTracker};
pub use input::{Point, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use crate::gestures::{DragEvent, DragGesture, GestureSample, TapGesture};
    pub use crate::input::{Point, PointerEvent, PointerEventKind};
}
