use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn callbacks_run_in_registration_order() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let log = Rc::new(RefCell::new(Vec::new()));

    for label in ["a", "b", "c"] {
        let log = Rc::clone(&log);
        handle.register_frame_callback(move |_| log.borrow_mut().push(label));
    }

    assert_eq!(handle.drain_frame_callbacks(16), 3);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    {
        let inner_handle = handle.clone();
        let frames = Rc::clone(&frames);
        handle.register_frame_callback(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            inner_handle.register_frame_callback(move |time| frames.borrow_mut().push(time));
        });
    }

    assert_eq!(handle.drain_frame_callbacks(10), 1);
    assert_eq!(handle.pending_frame_callbacks(), 1);
    assert_eq!(handle.drain_frame_callbacks(20), 1);
    assert_eq!(*frames.borrow(), vec![10, 20]);
    assert_eq!(handle.last_frame_nanos(), Some(20));
}

#[test]
fn cancelled_registration_never_runs() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let fired = Rc::new(RefCell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| *fired.borrow_mut() = true)
    };
    assert!(registration.is_active());
    registration.cancel();

    runtime.handle().drain_frame_callbacks(16);
    assert!(!*fired.borrow());
}

#[test]
fn callback_cancelled_by_earlier_callback_in_same_batch_is_skipped() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let fired = Rc::new(RefCell::new(false));
    let victim: Rc<RefCell<Option<FrameCallbackId>>> = Rc::new(RefCell::new(None));

    {
        let handle_for_cancel = handle.clone();
        let victim = Rc::clone(&victim);
        handle.register_frame_callback(move |_| {
            if let Some(id) = victim.borrow_mut().take() {
                handle_for_cancel.cancel_frame_callback(id);
            }
        });
    }
    let id = {
        let fired = Rc::clone(&fired);
        handle.register_frame_callback(move |_| *fired.borrow_mut() = true)
    };
    *victim.borrow_mut() = id;

    assert_eq!(handle.drain_frame_callbacks(16), 1);
    assert!(!*fired.borrow());
}

#[test]
fn frame_millis_are_derived_from_nanos() {
    let runtime = Runtime::new();
    let seen = Rc::new(RefCell::new(None));
    let _registration = {
        let seen = Rc::clone(&seen);
        runtime
            .handle()
            .frame_clock()
            .with_frame_millis(move |millis| *seen.borrow_mut() = Some(millis))
    };
    runtime.handle().drain_frame_callbacks(33_000_000);
    assert_eq!(*seen.borrow(), Some(33));
}

#[test]
fn scheduler_is_asked_once_per_pending_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::with_scheduler(scheduler.clone());
    let handle = runtime.handle();

    handle.register_frame_callback(|_| {});
    handle.register_frame_callback(|_| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);

    handle.drain_frame_callbacks(16);
    handle.register_frame_callback(|_| {});
    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn dropped_runtime_makes_registrations_inactive() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert_eq!(handle.drain_frame_callbacks(16), 0);
}
