//! Frame-driven animation channels.
//!
//! An [`Animatable`] holds one value and at most one running animation. Starting
//! a new animation, snapping, or stopping supersedes whatever was running: its
//! frame callback is cancelled before it can write again and its completion
//! resolves as [`AnimationEnd::Superseded`].

use std::cell::RefCell;
use std::rc::Rc;

use slidesheet_core::{
    FrameCallbackRegistration, MutableState, RuntimeHandle, State, NANOS_PER_MILLI,
};

use crate::completion::{AnimationCompletion, AnimationEnd};

/// Values that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * f64::from(fraction)
    }
}

/// Values that can be driven by a spring.
///
/// Physics runs in "progress" space, where the start value is 0 and the
/// target is 1, so one set of spring constants works for any range.
pub trait SpringScalar: Lerp + Clone + PartialEq {
    fn to_f32(&self) -> f32;

    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let span = target.to_f32() - start.to_f32();
        if span.abs() < f32::EPSILON {
            1.0
        } else {
            (current.to_f32() - start.to_f32()) / span
        }
    }

    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Material standard curve: accelerate quickly, settle gently.
    FastOutSlowIn,
    /// Used for elements entering the screen.
    LinearOutSlowIn,
    /// Used for elements leaving the screen.
    FastOutLinearIn,
    EaseInOut,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0).solve(fraction),
            Easing::LinearOutSlowIn => CubicBezier::new(0.0, 0.0, 0.2, 1.0).solve(fraction),
            Easing::FastOutLinearIn => CubicBezier::new(0.4, 0.0, 1.0, 1.0).solve(fraction),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).solve(fraction),
        }
    }
}

/// Cubic bezier through (0,0) and (1,1) with two control points.
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn axis(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn solve(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        // x(t) is monotonic for control points in [0, 1]; bisect for t.
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        let mut t = fraction;
        for _ in 0..24 {
            let x = Self::axis(self.x1, self.x2, t);
            if (x - fraction).abs() < 1e-6 {
                break;
            }
            if x < fraction {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        Self::axis(self.y1, self.y2, t)
    }
}

/// Duration-based animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    /// Measured from the first frame after the animation starts.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped; lower values overshoot.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Progress units per second below which the spring may settle.
    pub velocity_threshold: f32,
    /// Value distance from the target below which the spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.01,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP: f32 = 0.016;

/// A scalar channel that can be animated, snapped, and sampled.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

/// The channel type the bottom sheet drives.
pub type AnimationChannel = Animatable<f32>;

struct AnimatableInner<T: SpringScalar + 'static> {
    label: &'static str,
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    /// Progress units per second; only meaningful for springs.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    completion: Option<AnimationCompletion>,
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self::with_label(initial, runtime, "animatable")
    }

    /// Like [`Animatable::new`], with a label used in log output.
    pub fn with_label(initial: T, runtime: RuntimeHandle, label: &'static str) -> Self {
        let inner = AnimatableInner {
            label,
            state: MutableState::new(initial.clone()),
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            completion: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`, superseding any running animation.
    pub fn animate_to(&self, target: T, animation: AnimationType) -> AnimationCompletion {
        let completion = AnimationCompletion::pending();
        let superseded = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.velocity = 0.0;
            inner.completion.replace(completion.clone())
        };
        if let Some(previous) = superseded {
            previous.resolve(AnimationEnd::Superseded);
        }

        if !Self::schedule_frame(&self.inner) {
            // No runtime left to drive frames: the animation can never run.
            let orphan = self.inner.borrow_mut().completion.take();
            if let Some(orphan) = orphan {
                log::trace!("{}: runtime gone, animation dropped", self.label());
                orphan.resolve(AnimationEnd::Superseded);
            }
        }
        completion
    }

    /// Timed animation with the standard easing curve.
    pub fn tween_to(
        &self,
        target: T,
        duration_millis: u64,
        delay_millis: u64,
    ) -> AnimationCompletion {
        let spec =
            AnimationSpec::tween(duration_millis, Easing::FastOutSlowIn).with_delay(delay_millis);
        self.animate_to(target, AnimationType::Tween(spec))
    }

    /// Spring toward `target` with the default spring.
    pub fn spring_to(&self, target: T) -> AnimationCompletion {
        self.animate_to(target, AnimationType::Spring(SpringSpec::default()))
    }

    /// Jump to `value` without animating.
    pub fn snap_to(&self, value: T) {
        let superseded = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = value.clone();
            inner.start = value.clone();
            inner.target = value.clone();
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.velocity = 0.0;
            inner.state.set_value(value);
            inner.completion.take()
        };
        if let Some(previous) = superseded {
            previous.resolve(AnimationEnd::Superseded);
        }
    }

    /// Halt any running animation where it is.
    pub fn stop(&self) {
        let current = self.value();
        self.snap_to(current);
    }

    /// Sample the current value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().completion.is_some()
    }

    pub fn label(&self) -> &'static str {
        self.inner.borrow().label
    }

    /// Read handle for the presentation layer.
    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    /// Returns `false` if no frame could be requested.
    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) -> bool {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return true;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            return false;
        }
        this.borrow_mut().registration = Some(registration);
        true
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let settled = match inner.animation_type {
                AnimationType::Tween(spec) => inner.step_tween(spec, frame_time_nanos),
                AnimationType::Spring(spec) => inner.step_spring(spec, frame_time_nanos),
            };

            if settled {
                let target = inner.target.clone();
                inner.current = target.clone();
                inner.start = target.clone();
                inner.start_time_nanos = None;
                inner.last_frame_nanos = None;
                inner.velocity = 0.0;
                inner.state.set_value(target);
                finished = inner.completion.take();
                log::trace!("{}: settled", inner.label);
            } else {
                schedule_next = true;
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        // Continuations may start a new animation on this very channel.
        if let Some(completion) = finished {
            completion.resolve(AnimationEnd::Finished);
        }
    }
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    /// Advance a tween; returns `true` once it reaches the target.
    fn step_tween(&mut self, spec: AnimationSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start_time);
        let delay = spec.delay_millis * NANOS_PER_MILLI;
        if elapsed < delay {
            return false;
        }

        let duration = spec.duration_millis * NANOS_PER_MILLI;
        let linear_progress = if duration == 0 {
            1.0
        } else {
            ((elapsed - delay) as f32 / duration as f32).clamp(0.0, 1.0)
        };
        if linear_progress >= 1.0 {
            return true;
        }

        let eased = spec.easing.transform(linear_progress);
        let value = self.start.lerp(&self.target, eased);
        self.current = value.clone();
        self.state.set_value(value);
        false
    }

    /// Advance a spring by the time since the previous frame using
    /// semi-implicit Euler; returns `true` once it has settled.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            // First frame only establishes the time base.
            return false;
        };
        let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        if dt <= 0.0 {
            return false;
        }

        let stiffness = spec.stiffness;
        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
        let mut progress = T::spring_progress(&self.start, &self.target, &self.current);
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = SPRING_TIMESTEP.min(dt - simulated);
            let displacement = progress - 1.0;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            progress = (progress + self.velocity * step).clamp(0.0, 2.0);
            simulated += step;
        }

        let value = self.start.lerp(&self.target, progress);
        self.current = value.clone();
        self.state.set_value(value);

        self.velocity.abs() < spec.velocity_threshold
            && T::is_near_target(&self.current, &self.target, spec.position_threshold)
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: SpringScalar + std::fmt::Debug + 'static> std::fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("label", &inner.label)
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("running", &inner.completion.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
