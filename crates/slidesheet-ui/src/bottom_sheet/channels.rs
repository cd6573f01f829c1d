use slidesheet_animation::AnimationChannel;
use slidesheet_core::{RuntimeHandle, State};

/// The four animated values that fully describe the sheet on screen.
pub struct SheetChannels {
    /// Vertical translation of the sheet; 0 at rest, viewport height when closed.
    pub position: AnimationChannel,
    pub scrim_opacity: AnimationChannel,
    /// Backfill height below the sheet while it is dragged above its anchor.
    pub overscroll_height: AnimationChannel,
    /// Spacer keeping content clear of the on-screen keyboard.
    pub keyboard_inset: AnimationChannel,
}

/// A sample of every channel at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheetValues {
    pub position: f32,
    pub scrim_opacity: f32,
    pub overscroll_height: f32,
    pub keyboard_inset: f32,
}

impl SheetChannels {
    pub fn new(runtime: &RuntimeHandle, off_screen: f32) -> Self {
        Self {
            position: AnimationChannel::with_label(off_screen, runtime.clone(), "position"),
            scrim_opacity: AnimationChannel::with_label(0.0, runtime.clone(), "scrim"),
            overscroll_height: AnimationChannel::with_label(0.0, runtime.clone(), "overscroll"),
            keyboard_inset: AnimationChannel::with_label(0.0, runtime.clone(), "keyboard_inset"),
        }
    }

    pub fn values(&self) -> SheetValues {
        SheetValues {
            position: self.position.value(),
            scrim_opacity: self.scrim_opacity.value(),
            overscroll_height: self.overscroll_height.value(),
            keyboard_inset: self.keyboard_inset.value(),
        }
    }

    pub fn position_state(&self) -> State<f32> {
        self.position.state()
    }

    pub fn scrim_opacity_state(&self) -> State<f32> {
        self.scrim_opacity.state()
    }

    pub fn overscroll_height_state(&self) -> State<f32> {
        self.overscroll_height.state()
    }

    pub fn keyboard_inset_state(&self) -> State<f32> {
        self.keyboard_inset.state()
    }

    pub fn any_running(&self) -> bool {
        self.position.is_running()
            || self.scrim_opacity.is_running()
            || self.overscroll_height.is_running()
            || self.keyboard_inset.is_running()
    }

    pub fn stop_all(&self) {
        self.position.stop();
        self.scrim_opacity.stop();
        self.overscroll_height.stop();
        self.keyboard_inset.stop();
    }
}
