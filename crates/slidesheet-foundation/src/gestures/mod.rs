pub mod drag;
pub mod tap;
pub mod velocity;

pub use drag::{DragEvent, DragGesture, GestureSample};
pub use tap::TapGesture;
pub use velocity::VelocityTracker;
