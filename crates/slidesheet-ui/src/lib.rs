//! Gesture-driven bottom sheet.
//!
//! The sheet is described entirely by four animated scalars (see
//! [`SheetValues`]); a host binds them to transforms and forwards pointer,
//! layout, keyboard, and back-navigation events to [`BottomSheet`].

pub mod bottom_sheet;

pub use bottom_sheet::{
    release_decision, transition, BottomSheet, GestureTracker, HostCapabilities,
    KeyboardCoordinator, KeyboardHost, PresentationState, ReleaseDecision, SheetChannels,
    SheetConfig, SheetEffect, SheetEvent, SheetLayout, SheetTimings, SheetValues, Transition,
    DISMISS_THRESHOLD_FRACTION, MAX_HEIGHT_FRACTION, OPEN_SCRIM_OPACITY,
};
pub use slidesheet_foundation::{GestureSample, PointerEvent, PointerEventKind};
