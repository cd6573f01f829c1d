//! Platform abstraction traits for the runtime.
//!
//! These traits allow the runtime to delegate frame scheduling and clock
//! responsibilities to the host, so the same sheet logic runs under a real
//! event loop, a headless demo, or a deterministic test driver.

/// Schedules frames on behalf of the runtime.
///
/// Implementations must be safe to use from multiple threads; the runtime
/// itself only ever calls them from the UI thread.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for frame production.
pub trait Clock {
    /// Instant type produced by this clock implementation.
    type Instant: Copy;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        self.elapsed_nanos(since) / crate::NANOS_PER_MILLI
    }
}
