//! Presentation lifecycle as a pure transition function.
//!
//! `transition(state, event, persistent)` never touches a channel. It returns
//! the next state plus the effects the driver must carry out, so every
//! ordering question ("what if close arrives mid-open?") is answered here and
//! tested without a runtime.

use smallvec::SmallVec;

use super::gesture_tracker::ReleaseDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    /// Off-screen with a clear scrim.
    #[default]
    Closed,
    /// Sliding in; the scrim darkens once the slide has had its full duration.
    Opening,
    /// At rest; drags, scrim taps, and back presses are accepted.
    Open,
    /// A drag owns the position and overscroll channels.
    Dragging,
    /// Scrim clearing, sheet sliding off-screen.
    Closing,
}

impl PresentationState {
    /// Whether any part of the sheet may be on screen.
    pub fn is_visible(self) -> bool {
        self != PresentationState::Closed
    }

    /// Whether user dismissal (drag, scrim tap, back) applies in this state.
    pub fn accepts_dismissal(self) -> bool {
        matches!(self, PresentationState::Open | PresentationState::Dragging)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    /// The host's intent became (or was re-asserted as) "open".
    OpenRequested,
    /// The host's intent became (or was re-asserted as) "closed".
    CloseRequested,
    ScrimTapped,
    BackPressed,
    DragStarted,
    DragReleased(ReleaseDecision),
    /// The open slide (and delayed scrim) reached their targets.
    OpenSettled,
    /// The close slide (and scrim fade) reached their targets.
    CloseSettled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEffect {
    StartOpenAnimation,
    StartCloseAnimation,
    DismissKeyboard,
    /// Hand the position and overscroll channels to the gesture tracker.
    BeginDrag,
    /// Take the channels back from a drag that will not be released normally.
    CancelDrag,
    /// Spring position and overscroll back to rest.
    SpringBack,
    ResetGestureOffset,
    NotifyClosed,
}

pub type SheetEffects = SmallVec<[SheetEffect; 4]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PresentationState,
    pub effects: SheetEffects,
}

impl Transition {
    fn stay(state: PresentationState) -> Self {
        Self {
            state,
            effects: SheetEffects::new(),
        }
    }

    fn to(state: PresentationState, effects: &[SheetEffect]) -> Self {
        Self {
            state,
            effects: SmallVec::from_slice(effects),
        }
    }

    /// `true` when the event was absorbed without any change.
    pub fn is_noop(&self, from: PresentationState) -> bool {
        self.state == from && self.effects.is_empty()
    }
}

const CLOSE: &[SheetEffect] = &[SheetEffect::DismissKeyboard, SheetEffect::StartCloseAnimation];

const CLOSE_FROM_DRAG: &[SheetEffect] = &[
    SheetEffect::CancelDrag,
    SheetEffect::DismissKeyboard,
    SheetEffect::StartCloseAnimation,
];

pub fn transition(state: PresentationState, event: SheetEvent, persistent: bool) -> Transition {
    use PresentationState::*;
    use SheetEvent::*;

    match (state, event) {
        (Closed, OpenRequested) => Transition::to(Opening, &[SheetEffect::StartOpenAnimation]),
        // A superseded close never settles, so its drag backfill is cleared here.
        (Closing, OpenRequested) => Transition::to(
            Opening,
            &[SheetEffect::ResetGestureOffset, SheetEffect::StartOpenAnimation],
        ),
        (Opening | Open | Dragging, OpenRequested) => Transition::stay(state),

        // Host intent closes even a persistent sheet.
        (Opening | Open, CloseRequested) => Transition::to(Closing, CLOSE),
        (Dragging, CloseRequested) => Transition::to(Closing, CLOSE_FROM_DRAG),
        (Closed | Closing, CloseRequested) => Transition::stay(state),

        (_, ScrimTapped | BackPressed) if persistent => Transition::stay(state),
        (Open, ScrimTapped | BackPressed) => Transition::to(Closing, CLOSE),
        (Dragging, ScrimTapped | BackPressed) => Transition::to(Closing, CLOSE_FROM_DRAG),
        (_, ScrimTapped | BackPressed) => Transition::stay(state),

        (Open, DragStarted) => Transition::to(Dragging, &[SheetEffect::BeginDrag]),
        (_, DragStarted) => Transition::stay(state),

        (Dragging, DragReleased(decision)) if decision.should_dismiss && !persistent => {
            Transition::to(Closing, CLOSE)
        }
        (Dragging, DragReleased(_)) => Transition::to(Open, &[SheetEffect::SpringBack]),
        (_, DragReleased(_)) => Transition::stay(state),

        (Opening, OpenSettled) => Transition::to(Open, &[]),
        (_, OpenSettled) => Transition::stay(state),

        (Closing, CloseSettled) => Transition::to(
            Closed,
            &[SheetEffect::ResetGestureOffset, SheetEffect::NotifyClosed],
        ),
        (_, CloseSettled) => Transition::stay(state),
    }
}

#[cfg(test)]
#[path = "../tests/presentation_tests.rs"]
mod tests;
