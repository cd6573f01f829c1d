use super::*;

use PresentationState::*;

const ALL_STATES: [PresentationState; 5] = [Closed, Opening, Open, Dragging, Closing];

fn dismiss_at(offset: f32) -> ReleaseDecision {
    ReleaseDecision {
        should_dismiss: true,
        offset,
        threshold: 50.0,
        velocity: 0.0,
    }
}

fn effects(transition: &Transition) -> Vec<SheetEffect> {
    transition.effects.to_vec()
}

#[test]
fn open_request_from_closed_starts_opening() {
    let next = transition(Closed, SheetEvent::OpenRequested, false);
    assert_eq!(next.state, Opening);
    assert_eq!(effects(&next), vec![SheetEffect::StartOpenAnimation]);
}

#[test]
fn open_settled_completes_the_open() {
    let next = transition(Opening, SheetEvent::OpenSettled, false);
    assert_eq!(next.state, Open);
    assert!(next.effects.is_empty());
}

#[test]
fn close_request_mid_open_reverses_immediately() {
    let next = transition(Opening, SheetEvent::CloseRequested, false);
    assert_eq!(next.state, Closing);
    assert_eq!(
        effects(&next),
        vec![SheetEffect::DismissKeyboard, SheetEffect::StartCloseAnimation]
    );
}

#[test]
fn reopen_while_closing_restarts_the_open() {
    let next = transition(Closing, SheetEvent::OpenRequested, false);
    assert_eq!(next.state, Opening);
    assert_eq!(
        effects(&next),
        vec![SheetEffect::ResetGestureOffset, SheetEffect::StartOpenAnimation]
    );
}

#[test]
fn close_settled_resets_and_notifies() {
    let next = transition(Closing, SheetEvent::CloseSettled, false);
    assert_eq!(next.state, Closed);
    assert_eq!(
        effects(&next),
        vec![SheetEffect::ResetGestureOffset, SheetEffect::NotifyClosed]
    );
}

#[test]
fn stale_settle_events_are_ignored() {
    for state in ALL_STATES {
        if state != Opening {
            assert!(transition(state, SheetEvent::OpenSettled, false).is_noop(state));
        }
        if state != Closing {
            assert!(transition(state, SheetEvent::CloseSettled, false).is_noop(state));
        }
    }
}

#[test]
fn repeated_intent_is_idempotent() {
    for state in [Opening, Open, Dragging] {
        assert!(transition(state, SheetEvent::OpenRequested, false).is_noop(state));
    }
    for state in [Closed, Closing] {
        assert!(transition(state, SheetEvent::CloseRequested, false).is_noop(state));
    }
}

#[test]
fn scrim_and_back_close_an_open_sheet() {
    for event in [SheetEvent::ScrimTapped, SheetEvent::BackPressed] {
        let next = transition(Open, event, false);
        assert_eq!(next.state, Closing);
        assert!(next.effects.contains(&SheetEffect::StartCloseAnimation));
    }
}

#[test]
fn scrim_and_back_are_ignored_while_animating() {
    for state in [Closed, Opening, Closing] {
        for event in [SheetEvent::ScrimTapped, SheetEvent::BackPressed] {
            assert!(transition(state, event, false).is_noop(state));
        }
    }
}

#[test]
fn scrim_during_drag_cancels_the_drag_first() {
    let next = transition(Dragging, SheetEvent::ScrimTapped, false);
    assert_eq!(next.state, Closing);
    assert_eq!(next.effects[0], SheetEffect::CancelDrag);
}

#[test]
fn persistent_sheet_ignores_every_user_dismissal() {
    for state in ALL_STATES {
        for event in [
            SheetEvent::ScrimTapped,
            SheetEvent::BackPressed,
            SheetEvent::DragReleased(dismiss_at(400.0)),
        ] {
            let next = transition(state, event, true);
            if state != Closing {
                assert_ne!(next.state, Closing, "{event:?} closed a persistent sheet in {state:?}");
            }
            assert!(!next.effects.contains(&SheetEffect::StartCloseAnimation));
            assert!(!next.effects.contains(&SheetEffect::NotifyClosed));
        }
    }
}

#[test]
fn persistent_sheet_still_follows_host_intent() {
    let next = transition(Open, SheetEvent::CloseRequested, true);
    assert_eq!(next.state, Closing);
}

#[test]
fn drag_starts_only_from_open() {
    let next = transition(Open, SheetEvent::DragStarted, false);
    assert_eq!(next.state, Dragging);
    assert_eq!(effects(&next), vec![SheetEffect::BeginDrag]);

    for state in [Closed, Opening, Dragging, Closing] {
        assert!(transition(state, SheetEvent::DragStarted, false).is_noop(state));
    }
}

#[test]
fn release_past_threshold_closes() {
    let next = transition(Dragging, SheetEvent::DragReleased(dismiss_at(60.0)), false);
    assert_eq!(next.state, Closing);
    assert_eq!(
        effects(&next),
        vec![SheetEffect::DismissKeyboard, SheetEffect::StartCloseAnimation]
    );
}

#[test]
fn release_short_of_threshold_springs_back() {
    let decision = ReleaseDecision::retain(30.0, 120.0);
    let next = transition(Dragging, SheetEvent::DragReleased(decision), false);
    assert_eq!(next.state, Open);
    assert_eq!(effects(&next), vec![SheetEffect::SpringBack]);
}

#[test]
fn release_outside_a_drag_is_ignored() {
    for state in [Closed, Opening, Open, Closing] {
        let event = SheetEvent::DragReleased(dismiss_at(60.0));
        assert!(transition(state, event, false).is_noop(state));
    }
}

#[test]
fn only_closing_can_notify() {
    for state in ALL_STATES {
        for event in [
            SheetEvent::OpenRequested,
            SheetEvent::CloseRequested,
            SheetEvent::ScrimTapped,
            SheetEvent::BackPressed,
            SheetEvent::DragStarted,
            SheetEvent::DragReleased(dismiss_at(60.0)),
            SheetEvent::OpenSettled,
            SheetEvent::CloseSettled,
        ] {
            let next = transition(state, event, false);
            if next.effects.contains(&SheetEffect::NotifyClosed) {
                assert_eq!((state, event), (Closing, SheetEvent::CloseSettled));
            }
        }
    }
}

#[test]
fn visibility_and_dismissal_flags() {
    assert!(!Closed.is_visible());
    assert!(Opening.is_visible() && Closing.is_visible());
    assert!(Open.accepts_dismissal() && Dragging.accepts_dismissal());
    assert!(!Opening.accepts_dismissal() && !Closing.accepts_dismissal());
}
