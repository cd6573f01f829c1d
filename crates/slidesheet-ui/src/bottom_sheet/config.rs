use std::fmt;
use std::rc::Rc;

use slidesheet_animation::SpringSpec;

/// Fraction of the measured content height a drag must exceed to dismiss.
pub const DISMISS_THRESHOLD_FRACTION: f32 = 0.1;

/// Scrim opacity while the sheet is open.
pub const OPEN_SCRIM_OPACITY: f32 = 0.2;

/// The sheet never grows taller than this fraction of the viewport.
pub const MAX_HEIGHT_FRACTION: f32 = 0.9;

/// Durations used by the sheet's animations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetTimings {
    /// Slide in and slide out.
    pub slide_millis: u64,
    /// Scrim fade-in; starts once `slide_millis` has elapsed.
    pub scrim_fade_in_millis: u64,
    pub scrim_fade_out_millis: u64,
    pub keyboard_millis: u64,
    /// Spring used to return the sheet to rest after a drag.
    pub snap_back: SpringSpec,
}

impl Default for SheetTimings {
    fn default() -> Self {
        Self {
            slide_millis: 1000,
            scrim_fade_in_millis: 0,
            scrim_fade_out_millis: 5,
            keyboard_millis: 250,
            snap_back: SpringSpec::default(),
        }
    }
}

/// Everything a host supplies when mounting a sheet.
pub struct SheetConfig {
    pub should_open: bool,
    /// Fixed for the sheet's lifetime. A persistent sheet ignores drag
    /// dismissal, scrim taps, and back presses.
    pub persistent: bool,
    /// Always lay content out in a scroll container.
    pub scrollable: bool,
    pub timings: SheetTimings,
    render_content: Option<Rc<dyn Fn()>>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl SheetConfig {
    pub fn new() -> Self {
        Self {
            should_open: false,
            persistent: false,
            scrollable: false,
            timings: SheetTimings::default(),
            render_content: None,
            on_close: None,
        }
    }

    pub fn should_open(mut self, should_open: bool) -> Self {
        self.should_open = should_open;
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn timings(mut self, timings: SheetTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn render_content(mut self, render: impl Fn() + 'static) -> Self {
        self.render_content = Some(Rc::new(render));
        self
    }

    /// Called once each time a close completes.
    pub fn on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    /// Remove the close callback, e.g. to wrap it.
    pub fn take_on_close(&mut self) -> Option<Box<dyn FnMut()>> {
        self.on_close.take()
    }

    pub(crate) fn content(&self) -> Option<Rc<dyn Fn()>> {
        self.render_content.clone()
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("should_open", &self.should_open)
            .field("persistent", &self.persistent)
            .field("scrollable", &self.scrollable)
            .field("timings", &self.timings)
            .field("has_content", &self.render_content.is_some())
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_closed_dismissible_and_unscrolled() {
        let config = SheetConfig::default();
        assert!(!config.should_open);
        assert!(!config.persistent);
        assert!(!config.scrollable);
        assert!(config.content().is_none());
    }

    #[test]
    fn default_timings_sequence_scrim_after_slide() {
        let timings = SheetTimings::default();
        assert_eq!(timings.slide_millis, 1000);
        assert_eq!(timings.scrim_fade_in_millis, 0);
        assert_eq!(timings.scrim_fade_out_millis, 5);
        assert_eq!(timings.keyboard_millis, 250);
    }

    #[test]
    fn close_callback_can_be_taken() {
        let mut config = SheetConfig::new().on_close(|| {});
        assert!(config.take_on_close().is_some());
        assert!(config.take_on_close().is_none());
    }
}
