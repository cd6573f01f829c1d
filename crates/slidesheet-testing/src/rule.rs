//! Deterministic driver for a mounted sheet.
//!
//! [`SheetTestRule`] plays the part of the host: it owns the runtime, advances
//! a [`ManualClock`] one frame at a time, and records what the sheet asked of
//! the host (close notifications, keyboard dismissals).
//!
//! ```
//! use slidesheet_testing::SheetTestRule;
//! use slidesheet_ui::{PresentationState, SheetConfig};
//!
//! let mut rule = SheetTestRule::new(SheetConfig::new().should_open(true));
//! rule.run_until_idle();
//! assert_eq!(rule.state(), PresentationState::Open);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use slidesheet_core::{Runtime, RuntimeHandle};
use slidesheet_foundation::PointerEvent;
use slidesheet_ui::{
    BottomSheet, GestureSample, HostCapabilities, KeyboardHost, PresentationState, ReleaseDecision,
    SheetConfig, SheetValues,
};

use crate::clock::ManualClock;
use crate::keyboard::RecordingKeyboardHost;

/// One frame at 60Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound on frames pumped by [`SheetTestRule::run_until_idle`].
const MAX_IDLE_FRAMES: usize = 10_000;

/// Viewport used by [`SheetTestRule::new`].
pub const DEFAULT_VIEWPORT: f32 = 800.0;

pub struct SheetTestRule {
    sheet: BottomSheet,
    keyboard: Option<Rc<RecordingKeyboardHost>>,
    closes: Rc<Cell<usize>>,
    clock: ManualClock,
    runtime: Runtime,
}

impl SheetTestRule {
    /// Mount `config` in an 800px viewport with a non-resizing keyboard and
    /// back navigation.
    pub fn new(config: SheetConfig) -> Self {
        Self::mount(
            config,
            DEFAULT_VIEWPORT,
            Some(RecordingKeyboardHost::new()),
            true,
        )
    }

    pub fn mount(
        mut config: SheetConfig,
        viewport_height: f32,
        keyboard: Option<RecordingKeyboardHost>,
        back_navigation: bool,
    ) -> Self {
        let runtime = Runtime::new();
        let closes = Rc::new(Cell::new(0));
        let mut user_on_close = config.take_on_close();
        let counter = Rc::clone(&closes);
        let config = config.on_close(move || {
            counter.set(counter.get() + 1);
            if let Some(on_close) = user_on_close.as_mut() {
                on_close();
            }
        });

        let keyboard = keyboard.map(Rc::new);
        let mut host = HostCapabilities::new(viewport_height).with_back_navigation(back_navigation);
        if let Some(keyboard) = &keyboard {
            let keyboard: Rc<dyn KeyboardHost> = keyboard.clone();
            host = host.with_keyboard(keyboard);
        }
        let sheet = BottomSheet::mount(config, host, &runtime.handle());

        Self {
            sheet,
            keyboard,
            closes,
            clock: ManualClock::new(),
            runtime,
        }
    }

    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn state(&self) -> PresentationState {
        self.sheet.state()
    }

    pub fn values(&self) -> SheetValues {
        self.sheet.values()
    }

    /// Number of times the host's close callback ran.
    pub fn close_notifications(&self) -> usize {
        self.closes.get()
    }

    pub fn keyboard_dismissals(&self) -> usize {
        self.keyboard.as_ref().map_or(0, |keyboard| keyboard.dismissals())
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.handle().has_frame_callbacks()
    }

    /// Advance one frame and drain it. Returns the callbacks that ran.
    pub fn advance_frame(&mut self) -> usize {
        let now = self.clock.advance_nanos(FRAME_NANOS);
        self.runtime.handle().drain_frame_callbacks(now)
    }

    /// Advance frame by frame until at least `millis` have passed.
    pub fn advance_time_by(&mut self, millis: u64) {
        let target = self.clock.now_nanos() + millis * slidesheet_core::NANOS_PER_MILLI;
        while self.clock.now_nanos() < target {
            self.advance_frame();
        }
    }

    /// Pump frames until no animation wants another one.
    ///
    /// Returns the number of frames pumped.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while !self.is_idle() {
            if frames == MAX_IDLE_FRAMES {
                log::warn!("sheet still animating after {MAX_IDLE_FRAMES} frames");
                break;
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Open the sheet and let the open animation finish.
    pub fn open_and_settle(&mut self) {
        self.sheet.set_should_open(true);
        self.run_until_idle();
    }

    /// Drag the sheet by `delta_y` in `steps` even moves, one frame apart, then
    /// release with `velocity`.
    pub fn drag_by(
        &mut self,
        delta_y: f32,
        steps: usize,
        velocity: f32,
    ) -> Option<ReleaseDecision> {
        if !self.sheet.drag_begin() {
            return None;
        }
        let steps = steps.max(1);
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.sheet.drag_update(GestureSample::vertical(delta_y * fraction));
            self.advance_frame();
        }
        self.sheet.drag_end(velocity)
    }

    /// Press the drag handle at `from_y`, move to `to_y` in `steps`, and lift.
    pub fn swipe_handle(&mut self, from_y: f32, to_y: f32, steps: usize) {
        let steps = steps.max(1);
        self.sheet
            .on_handle_pointer_event(&PointerEvent::down(0.0, from_y, self.clock.now_millis()));
        for step in 1..=steps {
            self.advance_frame();
            let y = from_y + (to_y - from_y) * (step as f32 / steps as f32);
            self.sheet
                .on_handle_pointer_event(&PointerEvent::moved(0.0, y, self.clock.now_millis()));
        }
        self.advance_frame();
        self.sheet
            .on_handle_pointer_event(&PointerEvent::up(0.0, to_y, self.clock.now_millis()));
    }

    /// Tap the scrim at `(x, y)`.
    pub fn tap_scrim(&mut self, x: f32, y: f32) {
        let now = self.clock.now_millis();
        self.sheet.on_scrim_pointer_event(&PointerEvent::down(x, y, now));
        self.sheet.on_scrim_pointer_event(&PointerEvent::up(x, y, now + 50));
    }
}
