//! Keeps sheet content clear of the on-screen keyboard.
//!
//! The coordinator is the only writer of the keyboard inset channel and runs
//! independently of the presentation state. When the host's keyboard already
//! resizes the layout (or there is no keyboard) it never writes at all.

use std::cell::Cell;
use std::rc::Rc;

use slidesheet_animation::AnimationChannel;

use super::layout::sanitize_length;

#[derive(Debug)]
pub struct KeyboardCoordinator {
    enabled: bool,
    duration_millis: u64,
    keyboard_height: f32,
    /// Set while an inset animation runs; cleared by that animation's completion.
    animating: Rc<Cell<bool>>,
}

impl KeyboardCoordinator {
    pub fn new(enabled: bool, duration_millis: u64) -> Self {
        Self {
            enabled,
            duration_millis,
            keyboard_height: 0.0,
            animating: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn keyboard_height(&self) -> f32 {
        self.keyboard_height
    }

    pub fn is_animating(&self) -> bool {
        self.animating.get()
    }

    pub fn on_keyboard_shown(&mut self, height: f32, inset: &AnimationChannel) {
        let height = sanitize_length(height);
        if !self.enabled {
            return;
        }
        if self.animating.get() && inset.target() == height {
            log::trace!("keyboard inset already heading to {height}");
            return;
        }
        self.keyboard_height = height;
        self.animate(height, inset);
    }

    pub fn on_keyboard_hidden(&mut self, inset: &AnimationChannel) {
        if !self.enabled {
            return;
        }
        self.keyboard_height = 0.0;
        if self.animating.get() && inset.target() == 0.0 {
            return;
        }
        if !self.animating.get() && inset.value() == 0.0 {
            return;
        }
        self.animate(0.0, inset);
    }

    pub fn current_inset(&self, inset: &AnimationChannel) -> f32 {
        inset.value()
    }

    fn animate(&self, target: f32, inset: &AnimationChannel) {
        log::debug!("keyboard inset -> {target}");
        self.animating.set(true);
        let animating = Rc::clone(&self.animating);
        inset
            .tween_to(target, self.duration_millis, 0)
            .on_finished(move || animating.set(false));
    }
}
