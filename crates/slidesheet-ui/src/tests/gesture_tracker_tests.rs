use super::*;

use slidesheet_core::Runtime;

fn channels(runtime: &Runtime) -> SheetChannels {
    let channels = SheetChannels::new(&runtime.handle(), 800.0);
    channels.position.snap_to(0.0);
    channels
}

#[test]
fn threshold_is_a_tenth_of_content_height() {
    let decision = release_decision(60.0, 500.0, false, 0.0);
    assert_eq!(decision.threshold, 50.0);
    assert!(decision.should_dismiss);

    let decision = release_decision(30.0, 500.0, false, 0.0);
    assert!(!decision.should_dismiss);
}

#[test]
fn release_exactly_at_threshold_is_retained() {
    assert!(!release_decision(50.0, 500.0, false, 0.0).should_dismiss);
}

#[test]
fn persistent_never_dismisses() {
    let decision = release_decision(10_000.0, 500.0, true, 3_000.0);
    assert!(!decision.should_dismiss);
}

#[test]
fn unmeasured_content_dismisses_on_any_downward_release() {
    assert!(release_decision(0.5, 0.0, false, 0.0).should_dismiss);
    assert!(!release_decision(0.0, 0.0, false, 0.0).should_dismiss);
    assert!(release_decision(1.0, f32::NAN, false, 0.0).should_dismiss);
}

#[test]
fn velocity_is_recorded_but_does_not_decide() {
    let slow = release_decision(20.0, 500.0, false, 0.0);
    let fast = release_decision(20.0, 500.0, false, 5_000.0);
    assert_eq!(slow.should_dismiss, fast.should_dismiss);
    assert_eq!(fast.velocity, 5_000.0);
}

#[test]
fn downward_drag_moves_position_only() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    assert!(tracker.begin(&channels));
    assert!(tracker.update(GestureSample::vertical(40.0), &channels));

    assert_eq!(channels.position.value(), 40.0);
    assert_eq!(channels.overscroll_height.value(), 0.0);
    assert_eq!(tracker.offset(), 40.0);
}

#[test]
fn upward_drag_grows_overscroll_backfill() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    tracker.begin(&channels);
    tracker.update(GestureSample::vertical(-25.0), &channels);

    assert_eq!(channels.position.value(), -25.0);
    assert_eq!(channels.overscroll_height.value(), 25.0);
}

#[test]
fn updates_without_begin_write_nothing() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    assert!(!tracker.update(GestureSample::vertical(90.0), &channels));
    assert_eq!(channels.position.value(), 0.0);
    assert!(tracker.end(0.0, 500.0, false, &channels).is_none());
}

#[test]
fn overlapping_begin_is_rejected() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    assert!(tracker.begin(&channels));
    assert!(!tracker.begin(&channels));
}

#[test]
fn begin_stops_a_running_snap_back() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let channels = channels(&runtime);
    channels.position.snap_to(80.0);
    let snap_back = channels.position.spring_to(0.0);
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(16_000_000);
    let mid_flight = channels.position.value();

    let mut tracker = GestureTracker::new();
    tracker.begin(&channels);

    assert!(!channels.position.is_running());
    assert_eq!(channels.position.value(), mid_flight);
    assert!(!snap_back.is_finished());
}

#[test]
fn end_samples_the_channel_and_flattens_the_offset() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    tracker.begin(&channels);
    tracker.update(GestureSample::vertical(60.0), &channels);
    let decision = tracker.end(800.0, 500.0, false, &channels);

    let decision = decision.expect("active drag yields a decision");
    assert_eq!(decision.offset, 60.0);
    assert!(decision.should_dismiss);
    assert!(!tracker.is_active());
    assert_eq!(tracker.offset(), 0.0);
}

#[test]
fn non_finite_samples_are_flattened() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    tracker.begin(&channels);
    tracker.update(GestureSample::vertical(f32::NAN), &channels);
    assert_eq!(channels.position.value(), 0.0);
}

#[test]
fn reset_clears_backfill_and_reference_frame() {
    let runtime = Runtime::new();
    let channels = channels(&runtime);
    let mut tracker = GestureTracker::new();

    tracker.begin(&channels);
    tracker.update(GestureSample::vertical(-30.0), &channels);
    tracker.reset(&channels);

    assert!(!tracker.is_active());
    assert_eq!(tracker.offset(), 0.0);
    assert_eq!(channels.overscroll_height.value(), 0.0);
}
