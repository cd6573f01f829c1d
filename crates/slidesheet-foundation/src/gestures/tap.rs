//! Tap recogniser used for the scrim.

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::input::{Point, PointerEvent, PointerEventKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapGesture {
    slop: f32,
    press: Option<Point>,
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl TapGesture {
    pub fn new() -> Self {
        Self {
            slop: DRAG_THRESHOLD,
            press: None,
        }
    }

    /// Returns `true` when `event` completes a tap.
    ///
    /// A press that travels further than the slop, or whose release was
    /// already consumed by another handler, is not a tap.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.press = (!event.is_consumed()).then_some(event.position);
                false
            }
            PointerEventKind::Move => {
                if let Some(press) = self.press {
                    let dx = event.position.x - press.x;
                    let dy = event.position.y - press.y;
                    if (dx * dx + dy * dy).sqrt() > self.slop {
                        self.press = None;
                    }
                }
                false
            }
            PointerEventKind::Up => {
                let tapped = self.press.take().is_some() && !event.is_consumed();
                if tapped {
                    event.consume();
                }
                tapped
            }
            PointerEventKind::Cancel => {
                self.reset();
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}
