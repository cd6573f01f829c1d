//! Core runtime for Slidesheet.
//!
//! Everything here runs on one logical UI thread: frame callbacks are
//! registered by animations, drained once per frame by the host, and the
//! values they produce are published through [`MutableState`].

pub mod frame_clock;
pub mod platform;
pub mod runtime;
pub mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, State};

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
