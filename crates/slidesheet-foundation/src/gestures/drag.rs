//! Vertical drag recogniser.
//!
//! Turns a press/move/release sequence into drag events whose samples are
//! offsets from the press position. Moves inside [`DRAG_THRESHOLD`] are
//! ignored so that a slightly wobbly tap never starts a drag.

use smallvec::SmallVec;

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::gestures::velocity::VelocityTracker;
use crate::input::{Point, PointerEvent, PointerEventKind, PointerId};

/// Offset of the pointer from where the drag was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    pub delta_x: f32,
    pub delta_y: f32,
}

impl GestureSample {
    pub const fn new(delta_x: f32, delta_y: f32) -> Self {
        Self { delta_x, delta_y }
    }

    pub const fn vertical(delta_y: f32) -> Self {
        Self::new(0.0, delta_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Started,
    Moved(GestureSample),
    Ended {
        sample: GestureSample,
        velocity_y: f32,
    },
    Cancelled,
}

pub type DragEvents = SmallVec<[DragEvent; 2]>;

#[derive(Debug, Clone)]
pub struct DragGesture {
    slop: f32,
    pointer: Option<PointerId>,
    press: Point,
    dragging: bool,
    last_sample: GestureSample,
    velocity: VelocityTracker,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self::with_slop(DRAG_THRESHOLD)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self {
            slop: slop.max(0.0),
            pointer: None,
            press: Point::ZERO,
            dragging: false,
            last_sample: GestureSample::default(),
            velocity: VelocityTracker::new(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> DragEvents {
        let mut events = DragEvents::new();
        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_some() {
                    // Secondary pointers do not affect an active press.
                    return events;
                }
                self.pointer = Some(event.id);
                self.press = event.position;
                self.dragging = false;
                self.last_sample = GestureSample::default();
                self.velocity.reset();
                self.velocity.add_sample(event.uptime_millis, event.position.y);
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                self.velocity.add_sample(event.uptime_millis, event.position.y);
                let sample = GestureSample::new(
                    event.position.x - self.press.x,
                    event.position.y - self.press.y,
                );
                if !self.dragging && sample.delta_y.abs() > self.slop {
                    self.dragging = true;
                    log::trace!("drag started after {:.1}px", sample.delta_y);
                    events.push(DragEvent::Started);
                }
                if self.dragging {
                    self.last_sample = sample;
                    event.consume();
                    events.push(DragEvent::Moved(sample));
                }
            }
            PointerEventKind::Up => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                if self.dragging {
                    self.velocity.add_sample(event.uptime_millis, event.position.y);
                    event.consume();
                    events.push(DragEvent::Ended {
                        sample: self.last_sample,
                        velocity_y: self.velocity.velocity_y(),
                    });
                }
                self.reset();
            }
            PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                if self.dragging {
                    events.push(DragEvent::Cancelled);
                }
                self.reset();
            }
        }
        events
    }

    pub fn reset(&mut self) {
        self.pointer = None;
        self.press = Point::ZERO;
        self.dragging = false;
        self.last_sample = GestureSample::default();
        self.velocity.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(gesture: &mut DragGesture, events: &[PointerEvent]) -> Vec<DragEvent> {
        events
            .iter()
            .flat_map(|event| gesture.on_pointer_event(event))
            .collect()
    }

    #[test]
    fn moves_inside_slop_do_not_start_a_drag() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(10.0, 100.0, 0),
                PointerEvent::moved(10.0, 105.0, 16),
                PointerEvent::up(10.0, 105.0, 32),
            ],
        );
        assert!(events.is_empty());
    }

    #[test]
    fn samples_are_relative_to_the_press() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(10.0, 100.0, 0),
                PointerEvent::moved(12.0, 120.0, 16),
                PointerEvent::moved(12.0, 160.0, 32),
            ],
        );
        assert_eq!(
            events,
            vec![
                DragEvent::Started,
                DragEvent::Moved(GestureSample::new(2.0, 20.0)),
                DragEvent::Moved(GestureSample::new(2.0, 60.0)),
            ]
        );
        assert!(gesture.is_dragging());
    }

    #[test]
    fn upward_drags_produce_negative_offsets() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 300.0, 0),
                PointerEvent::moved(0.0, 270.0, 16),
            ],
        );
        assert_eq!(events.last(), Some(&DragEvent::Moved(GestureSample::vertical(-30.0))));
    }

    #[test]
    fn release_reports_last_sample_and_velocity() {
        let mut gesture = DragGesture::new();
        let up = PointerEvent::up(0.0, 150.0, 50);
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 100.0, 0),
                PointerEvent::moved(0.0, 150.0, 50),
                up.clone(),
            ],
        );
        match events.last() {
            Some(DragEvent::Ended { sample, velocity_y }) => {
                assert_eq!(*sample, GestureSample::vertical(50.0));
                assert!((velocity_y - 1000.0).abs() < 0.01);
            }
            other => panic!("expected Ended, got {other:?}"),
        }
        assert!(up.is_consumed());
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn cancel_only_reports_an_active_drag() {
        let mut gesture = DragGesture::new();
        let cancel = PointerEvent::new(PointerEventKind::Cancel, Point::ZERO, 10);
        let events = feed(&mut gesture, &[PointerEvent::down(0.0, 0.0, 0), cancel.clone()]);
        assert!(events.is_empty());

        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 0.0, 20),
                PointerEvent::moved(0.0, 40.0, 36),
                cancel,
            ],
        );
        assert_eq!(events.last(), Some(&DragEvent::Cancelled));
    }

    #[test]
    fn secondary_pointer_is_ignored() {
        let mut gesture = DragGesture::new();
        let events = feed(
            &mut gesture,
            &[
                PointerEvent::down(0.0, 0.0, 0),
                PointerEvent::down(50.0, 50.0, 5).with_id(1),
                PointerEvent::moved(50.0, 200.0, 10).with_id(1),
            ],
        );
        assert!(events.is_empty());
    }
}
