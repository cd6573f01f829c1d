//! Completion signal for a single animation invocation.
//!
//! Every call that starts an animation returns an [`AnimationCompletion`].
//! The signal resolves exactly once: [`AnimationEnd::Finished`] when the
//! channel reaches its target, or [`AnimationEnd::Superseded`] when another
//! animation (or a snap) takes the channel over first.
//!
//! Continuations registered with [`AnimationCompletion::on_finished`] only run
//! for `Finished`; a superseded animation drops them unrun. Awaiting the
//! completion as a future always resolves, so async callers never hang on a
//! cancelled animation.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use smallvec::SmallVec;

/// How an animation invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The channel reached the animation's target.
    Finished,
    /// Another animation or snap took over the channel first.
    Superseded,
}

type EndListener = Box<dyn FnOnce(AnimationEnd)>;

struct CompletionState {
    outcome: Option<AnimationEnd>,
    listeners: SmallVec<[EndListener; 2]>,
    waker: Option<Waker>,
}

#[derive(Clone)]
pub struct AnimationCompletion {
    state: Rc<RefCell<CompletionState>>,
}

impl AnimationCompletion {
    pub(crate) fn pending() -> Self {
        Self {
            state: Rc::new(RefCell::new(CompletionState {
                outcome: None,
                listeners: SmallVec::new(),
                waker: None,
            })),
        }
    }

    /// A completion that has already finished.
    pub fn finished() -> Self {
        let completion = Self::pending();
        completion.resolve(AnimationEnd::Finished);
        completion
    }

    /// Resolve the signal. Later calls are ignored.
    pub(crate) fn resolve(&self, end: AnimationEnd) {
        let (listeners, waker) = {
            let mut state = self.state.borrow_mut();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(end);
            (std::mem::take(&mut state.listeners), state.waker.take())
        };
        for listener in listeners {
            listener(end);
        }
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    fn on_end(&self, listener: impl FnOnce(AnimationEnd) + 'static) {
        let end = {
            let mut state = self.state.borrow_mut();
            match state.outcome {
                Some(end) => end,
                None => {
                    state.listeners.push(Box::new(listener));
                    return;
                }
            }
        };
        listener(end);
    }

    /// Run `continuation` once the animation reaches its target.
    ///
    /// Runs immediately if the animation already finished; never runs if it
    /// was superseded.
    pub fn on_finished(&self, continuation: impl FnOnce() + 'static) -> &Self {
        self.on_end(move |end| {
            if end == AnimationEnd::Finished {
                continuation();
            }
        });
        self
    }

    pub fn outcome(&self) -> Option<AnimationEnd> {
        self.state.borrow().outcome
    }

    pub fn is_pending(&self) -> bool {
        self.outcome().is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome() == Some(AnimationEnd::Finished)
    }

    /// Combine several completions into one that finishes when all of them
    /// finish, and is superseded as soon as any of them is.
    pub fn join(completions: impl IntoIterator<Item = AnimationCompletion>) -> Self {
        let joined = Self::pending();
        let parts: SmallVec<[AnimationCompletion; 4]> = completions.into_iter().collect();
        if parts.is_empty() {
            joined.resolve(AnimationEnd::Finished);
            return joined;
        }

        let remaining = Rc::new(RefCell::new(parts.len()));
        for part in parts {
            let joined = joined.clone();
            let remaining = Rc::clone(&remaining);
            part.on_end(move |end| match end {
                AnimationEnd::Superseded => joined.resolve(AnimationEnd::Superseded),
                AnimationEnd::Finished => {
                    let done = {
                        let mut remaining = remaining.borrow_mut();
                        *remaining -= 1;
                        *remaining == 0
                    };
                    if done {
                        joined.resolve(AnimationEnd::Finished);
                    }
                }
            });
        }
        joined
    }
}

impl Future for AnimationCompletion {
    type Output = AnimationEnd;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        match state.outcome {
            Some(end) => Poll::Ready(end),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl fmt::Debug for AnimationCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationCompletion")
            .field("outcome", &self.outcome())
            .finish()
    }
}
