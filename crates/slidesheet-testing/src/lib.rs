//! Testing utilities and harness for Slidesheet

pub mod clock;
pub mod keyboard;
pub mod rule;

pub use clock::ManualClock;
pub use keyboard::RecordingKeyboardHost;
pub use rule::{SheetTestRule, FRAME_NANOS};

pub mod prelude {
    pub use crate::clock::ManualClock;
    pub use crate::keyboard::RecordingKeyboardHost;
    pub use crate::rule::*;
}
