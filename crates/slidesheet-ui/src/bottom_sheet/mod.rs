//! Bottom sheet driver.
//!
//! [`BottomSheet`] owns the presentation state and the four channels. Every
//! input becomes a [`SheetEvent`] fed through [`transition`]; the resulting
//! effects are applied to the channels, and animation completions come back
//! in as further events. Calls into the host (keyboard dismissal, the close
//! callback) happen only after the sheet's own state is released, so the host
//! may call straight back into the sheet.

mod channels;
mod config;
mod gesture_tracker;
mod host;
mod keyboard;
mod layout;
mod presentation;

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use slidesheet_animation::{AnimationCompletion, AnimationSpec, AnimationType};
use slidesheet_core::{RuntimeHandle, State};
use slidesheet_foundation::{DragEvent, DragGesture, GestureSample, PointerEvent, TapGesture};

pub use channels::{SheetChannels, SheetValues};
pub use config::{
    SheetConfig, SheetTimings, DISMISS_THRESHOLD_FRACTION, MAX_HEIGHT_FRACTION,
    OPEN_SCRIM_OPACITY,
};
pub use gesture_tracker::{release_decision, GestureTracker, ReleaseDecision};
pub use host::{HostCapabilities, KeyboardHost};
pub use keyboard::KeyboardCoordinator;
pub use layout::SheetLayout;
pub use presentation::{transition, PresentationState, SheetEffect, SheetEvent, Transition};

use layout::sanitize_length;

/// Work that leaves the sheet and must run with no borrow held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostCall {
    DismissKeyboard,
    NotifyClosed,
}

type HostCalls = SmallVec<[HostCall; 2]>;

struct SheetInner {
    state: PresentationState,
    persistent: bool,
    scrollable: bool,
    timings: SheetTimings,
    content: Option<Rc<dyn Fn()>>,
    on_close: Option<Box<dyn FnMut()>>,
    host: HostCapabilities,
    viewport_height: f32,
    content_height: f32,
    wants_open: bool,
    close_count: u64,
    channels: SheetChannels,
    tracker: GestureTracker,
    keyboard: KeyboardCoordinator,
    drag: DragGesture,
    scrim_tap: TapGesture,
    content_tap: TapGesture,
}

/// One mounted bottom sheet.
pub struct BottomSheet {
    inner: Rc<RefCell<SheetInner>>,
}

impl BottomSheet {
    /// Mount a sheet. It starts closed; if the config asks for it to be open,
    /// the open transition starts immediately.
    pub fn mount(
        mut config: SheetConfig,
        host: HostCapabilities,
        runtime: &RuntimeHandle,
    ) -> Self {
        let viewport_height = sanitize_length(host.viewport_height);
        let keyboard =
            KeyboardCoordinator::new(host.needs_keyboard_inset(), config.timings.keyboard_millis);
        let inner = SheetInner {
            state: PresentationState::Closed,
            persistent: config.persistent,
            scrollable: config.scrollable,
            timings: config.timings,
            content: config.content(),
            on_close: config.take_on_close(),
            host,
            viewport_height,
            content_height: 0.0,
            wants_open: false,
            close_count: 0,
            channels: SheetChannels::new(runtime, viewport_height),
            tracker: GestureTracker::new(),
            keyboard,
            drag: DragGesture::new(),
            scrim_tap: TapGesture::new(),
            content_tap: TapGesture::new(),
        };
        log::debug!(
            "sheet mounted (persistent: {}, viewport: {viewport_height})",
            config.persistent
        );

        let sheet = Self {
            inner: Rc::new(RefCell::new(inner)),
        };
        if config.should_open {
            sheet.set_should_open(true);
        }
        sheet
    }

    /// Reconcile the host's open/closed intent against the current state.
    ///
    /// Level-triggered: re-asserting the current intent is a no-op.
    pub fn set_should_open(&self, should_open: bool) {
        self.inner.borrow_mut().wants_open = should_open;
        let event = if should_open {
            SheetEvent::OpenRequested
        } else {
            SheetEvent::CloseRequested
        };
        Self::dispatch(&self.inner, event);
    }

    pub fn on_content_measured(&self, height: f32) {
        let height = sanitize_length(height);
        let mut inner = self.inner.borrow_mut();
        if inner.content_height != height {
            log::trace!("content measured at {height}");
            inner.content_height = height;
        }
    }

    pub fn on_keyboard_shown(&self, height: f32) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner
            .keyboard
            .on_keyboard_shown(height, &inner.channels.keyboard_inset);
    }

    pub fn on_keyboard_hidden(&self) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner
            .keyboard
            .on_keyboard_hidden(&inner.channels.keyboard_inset);
    }

    /// A tap on the sheet's content outside any input hides the keyboard.
    pub fn on_content_tapped(&self) {
        if !self.state().is_visible() {
            log::trace!("content tap ignored while closed");
            return;
        }
        let calls = HostCalls::from_slice(&[HostCall::DismissKeyboard]);
        Self::run_host_calls(&self.inner, calls);
        self.on_keyboard_hidden();
    }

    pub fn on_scrim_tapped(&self) {
        Self::dispatch(&self.inner, SheetEvent::ScrimTapped);
    }

    /// Returns `true` when the sheet consumed the back press.
    ///
    /// A visible sheet always consumes it, even a persistent one that will not
    /// close. Hosts without back navigation never deliver it.
    pub fn on_back_pressed(&self) -> bool {
        let (supported, visible) = {
            let inner = self.inner.borrow();
            (inner.host.back_navigation, inner.state.is_visible())
        };
        if !supported || !visible {
            return false;
        }
        Self::dispatch(&self.inner, SheetEvent::BackPressed);
        true
    }

    /// Start a drag. Only an open sheet can be dragged.
    pub fn drag_begin(&self) -> bool {
        Self::dispatch(&self.inner, SheetEvent::DragStarted);
        self.state() == PresentationState::Dragging
    }

    pub fn drag_update(&self, sample: GestureSample) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        if inner.state != PresentationState::Dragging {
            log::trace!("drag update ignored in {:?}", inner.state);
            return false;
        }
        inner.tracker.update(sample, &inner.channels)
    }

    /// Release the drag. Returns the decision, or `None` if no drag was active.
    pub fn drag_end(&self, velocity: f32) -> Option<ReleaseDecision> {
        let decision = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            if inner.state != PresentationState::Dragging {
                log::trace!("drag end ignored in {:?}", inner.state);
                return None;
            }
            inner.tracker.end(
                velocity,
                inner.content_height,
                inner.persistent,
                &inner.channels,
            )?
        };
        Self::dispatch(&self.inner, SheetEvent::DragReleased(decision));
        Some(decision)
    }

    /// Abandon the drag (e.g. the platform stole the pointer); the sheet
    /// returns to rest.
    pub fn drag_cancel(&self) -> bool {
        let decision = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != PresentationState::Dragging {
                return false;
            }
            let offset = inner.channels.position.value();
            inner.tracker.cancel();
            ReleaseDecision::retain(offset, 0.0)
        };
        Self::dispatch(&self.inner, SheetEvent::DragReleased(decision));
        true
    }

    /// Feed a raw pointer event from the sheet's drag handle.
    pub fn on_handle_pointer_event(&self, event: &PointerEvent) {
        let events = self.inner.borrow_mut().drag.on_pointer_event(event);
        for drag_event in events {
            match drag_event {
                DragEvent::Started => {
                    self.drag_begin();
                }
                DragEvent::Moved(sample) => {
                    self.drag_update(sample);
                }
                DragEvent::Ended { velocity_y, .. } => {
                    self.drag_end(velocity_y);
                }
                DragEvent::Cancelled => {
                    self.drag_cancel();
                }
            }
        }
    }

    /// Feed a raw pointer event that landed on the scrim.
    pub fn on_scrim_pointer_event(&self, event: &PointerEvent) {
        let tapped = self.inner.borrow_mut().scrim_tap.on_pointer_event(event);
        if tapped {
            self.on_scrim_tapped();
        }
    }

    /// Feed a raw pointer event that landed on the sheet's content.
    pub fn on_content_pointer_event(&self, event: &PointerEvent) {
        let tapped = self.inner.borrow_mut().content_tap.on_pointer_event(event);
        if tapped {
            self.on_content_tapped();
        }
    }

    /// Render the host's content if the sheet is on screen.
    pub fn render_content(&self) -> bool {
        let content = {
            let inner = self.inner.borrow();
            if !inner.state.is_visible() {
                return false;
            }
            inner.content.clone()
        };
        match content {
            Some(render) => {
                render();
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> PresentationState {
        self.inner.borrow().state
    }

    pub fn wants_open(&self) -> bool {
        self.inner.borrow().wants_open
    }

    pub fn is_persistent(&self) -> bool {
        self.inner.borrow().persistent
    }

    pub fn content_height(&self) -> f32 {
        self.inner.borrow().content_height
    }

    /// Current drag-dismiss threshold.
    pub fn threshold(&self) -> f32 {
        self.content_height() * DISMISS_THRESHOLD_FRACTION
    }

    /// Number of closes completed since mount.
    pub fn close_count(&self) -> u64 {
        self.inner.borrow().close_count
    }

    pub fn values(&self) -> SheetValues {
        self.inner.borrow().channels.values()
    }

    pub fn position(&self) -> State<f32> {
        self.inner.borrow().channels.position_state()
    }

    pub fn scrim_opacity(&self) -> State<f32> {
        self.inner.borrow().channels.scrim_opacity_state()
    }

    pub fn overscroll_height(&self) -> State<f32> {
        self.inner.borrow().channels.overscroll_height_state()
    }

    pub fn keyboard_inset(&self) -> State<f32> {
        self.inner.borrow().channels.keyboard_inset_state()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().channels.any_running()
    }

    pub fn layout(&self) -> SheetLayout {
        let inner = self.inner.borrow();
        let spacer = if inner.keyboard.is_enabled() {
            inner.keyboard.current_inset(&inner.channels.keyboard_inset)
        } else {
            0.0
        };
        SheetLayout::compute(
            inner.viewport_height,
            inner.content_height,
            inner.scrollable,
            spacer,
        )
    }

    /// Tear the sheet down. In-flight animations are superseded and no close
    /// notification fires.
    pub fn unmount(self) {
        drop(self);
    }

    fn dispatch(this: &Rc<RefCell<SheetInner>>, event: SheetEvent) {
        let calls = {
            let mut inner = this.borrow_mut();
            let from = inner.state;
            let next = transition(from, event, inner.persistent);
            if next.is_noop(from) {
                log::trace!("{event:?} ignored in {from:?}");
                return;
            }
            let Transition { state, effects } = next;
            if state != from {
                log::debug!("sheet {from:?} -> {state:?} on {event:?}");
            }
            inner.state = state;

            let mut calls = HostCalls::new();
            for effect in effects {
                if let Some(call) = inner.apply(effect, this) {
                    calls.push(call);
                }
            }
            calls
        };
        Self::run_host_calls(this, calls);
    }

    fn run_host_calls(this: &Rc<RefCell<SheetInner>>, calls: HostCalls) {
        for call in calls {
            match call {
                HostCall::DismissKeyboard => {
                    let host = this.borrow().host.clone();
                    host.dismiss_keyboard();
                }
                HostCall::NotifyClosed => {
                    let callback = {
                        let mut inner = this.borrow_mut();
                        inner.close_count += 1;
                        inner.on_close.take()
                    };
                    log::debug!("sheet closed");
                    if let Some(mut callback) = callback {
                        callback();
                        let mut inner = this.borrow_mut();
                        if inner.on_close.is_none() {
                            inner.on_close = Some(callback);
                        }
                    }
                }
            }
        }
    }
}

impl SheetInner {
    fn apply(&mut self, effect: SheetEffect, this: &Rc<RefCell<SheetInner>>) -> Option<HostCall> {
        let timings = self.timings;
        match effect {
            SheetEffect::StartOpenAnimation => {
                let slide = self.channels.position.tween_to(0.0, timings.slide_millis, 0);
                // The scrim waits out the slide so the sheet is in place first.
                let fade_in = AnimationSpec::linear(timings.scrim_fade_in_millis)
                    .with_delay(timings.slide_millis);
                let scrim = self
                    .channels
                    .scrim_opacity
                    .animate_to(OPEN_SCRIM_OPACITY, AnimationType::Tween(fade_in));
                Self::when_finished(this, [slide, scrim], SheetEvent::OpenSettled);
                None
            }
            SheetEffect::StartCloseAnimation => {
                let fade_out = AnimationSpec::linear(timings.scrim_fade_out_millis);
                let scrim = self
                    .channels
                    .scrim_opacity
                    .animate_to(0.0, AnimationType::Tween(fade_out));
                let slide = self
                    .channels
                    .position
                    .tween_to(self.viewport_height, timings.slide_millis, 0);
                Self::when_finished(this, [scrim, slide], SheetEvent::CloseSettled);
                None
            }
            SheetEffect::DismissKeyboard => Some(HostCall::DismissKeyboard),
            SheetEffect::BeginDrag => {
                self.tracker.begin(&self.channels);
                None
            }
            SheetEffect::CancelDrag => {
                self.tracker.cancel();
                None
            }
            SheetEffect::SpringBack => {
                let spring = AnimationType::Spring(timings.snap_back);
                self.channels.position.animate_to(0.0, spring);
                self.channels.overscroll_height.animate_to(0.0, spring);
                None
            }
            SheetEffect::ResetGestureOffset => {
                self.tracker.reset(&self.channels);
                None
            }
            SheetEffect::NotifyClosed => Some(HostCall::NotifyClosed),
        }
    }

    fn when_finished(
        this: &Rc<RefCell<SheetInner>>,
        completions: [AnimationCompletion; 2],
        event: SheetEvent,
    ) {
        let weak = Rc::downgrade(this);
        AnimationCompletion::join(completions).on_finished(move || {
            if let Some(inner) = weak.upgrade() {
                BottomSheet::dispatch(&inner, event);
            }
        });
    }
}

impl Drop for BottomSheet {
    fn drop(&mut self) {
        if let Ok(inner) = self.inner.try_borrow() {
            inner.channels.stop_all();
            log::debug!("sheet unmounted in {:?}", inner.state);
        }
    }
}
