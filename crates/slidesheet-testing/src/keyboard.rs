use std::cell::Cell;

use slidesheet_ui::KeyboardHost;

/// Keyboard host that records dismissal requests.
#[derive(Debug, Default)]
pub struct RecordingKeyboardHost {
    resizes_layout: bool,
    dismissals: Cell<usize>,
}

impl RecordingKeyboardHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A keyboard whose platform already shrinks the layout.
    pub fn resizing() -> Self {
        Self {
            resizes_layout: true,
            dismissals: Cell::new(0),
        }
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.get()
    }
}

impl KeyboardHost for RecordingKeyboardHost {
    fn resizes_layout(&self) -> bool {
        self.resizes_layout
    }

    fn dismiss(&self) {
        self.dismissals.set(self.dismissals.get() + 1);
    }
}
