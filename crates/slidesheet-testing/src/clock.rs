use std::cell::Cell;

use slidesheet_core::{Clock, NANOS_PER_MILLI};

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_nanos: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_nanos(&self, nanos: u64) -> u64 {
        let now = self.now_nanos.get().saturating_add(nanos);
        self.now_nanos.set(now);
        now
    }

    pub fn advance_millis(&self, millis: u64) -> u64 {
        self.advance_nanos(millis * NANOS_PER_MILLI)
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos.get()
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos.get() / NANOS_PER_MILLI
    }
}

impl Clock for ManualClock {
    type Instant = u64;

    fn now(&self) -> u64 {
        self.now_nanos.get()
    }

    fn elapsed_nanos(&self, since: u64) -> u64 {
        self.now_nanos.get().saturating_sub(since)
    }
}
