//! Optional capabilities of the hosting environment.
//!
//! The sheet never asks which platform it runs on. It asks whether the host
//! offers a keyboard, whether that keyboard already resizes the layout, and
//! whether hardware back navigation exists.

use std::fmt;
use std::rc::Rc;

/// Access to the platform's on-screen keyboard.
pub trait KeyboardHost {
    /// `true` when the platform already shrinks the layout while the keyboard
    /// is up, making the sheet's own inset unnecessary.
    fn resizes_layout(&self) -> bool {
        false
    }

    /// Ask the platform to hide the keyboard.
    fn dismiss(&self);
}

#[derive(Clone)]
pub struct HostCapabilities {
    /// Height of the viewport; the sheet rests off-screen at this offset.
    pub viewport_height: f32,
    pub keyboard: Option<Rc<dyn KeyboardHost>>,
    pub back_navigation: bool,
}

impl HostCapabilities {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height,
            keyboard: None,
            back_navigation: false,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Rc<dyn KeyboardHost>) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_back_navigation(mut self, back_navigation: bool) -> Self {
        self.back_navigation = back_navigation;
        self
    }

    /// Whether the sheet must keep its content clear of the keyboard itself.
    pub fn needs_keyboard_inset(&self) -> bool {
        self.keyboard
            .as_ref()
            .is_some_and(|keyboard| !keyboard.resizes_layout())
    }

    pub(crate) fn dismiss_keyboard(&self) {
        if let Some(keyboard) = &self.keyboard {
            keyboard.dismiss();
        }
    }
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("viewport_height", &self.viewport_height)
            .field("keyboard", &self.keyboard.is_some())
            .field("back_navigation", &self.back_navigation)
            .finish()
    }
}
