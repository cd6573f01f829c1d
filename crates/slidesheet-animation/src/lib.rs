//! Animation system for Slidesheet
//!
//! Provides frame-driven scalar channels with easing curves, spring physics,
//! and a completion signal per animation invocation.

pub mod animation;
pub mod completion;

pub use animation::{
    Animatable, AnimationChannel, AnimationSpec, AnimationType, Easing, Lerp, SpringScalar,
    SpringSpec,
};
pub use completion::{AnimationCompletion, AnimationEnd};
