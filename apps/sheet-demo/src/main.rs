//! Scripted bottom sheet session.
//!
//! Runs the sheet against the wall clock with no window: opens it, raises and
//! lowers a keyboard, drags it a little, then drags it closed.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, ensure, Result};
use slidesheet_core::{Clock, Runtime, RuntimeScheduler};
use slidesheet_ui::{
    BottomSheet, GestureSample, HostCapabilities, KeyboardHost, PresentationState, SheetConfig,
};
use web_time::Instant;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 1_000;

/// Records that the runtime wants a frame; the loop below picks it up.
#[derive(Default)]
struct FrameRequests {
    pending: AtomicBool,
}

impl FrameRequests {
    fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl RuntimeScheduler for FrameRequests {
    fn schedule_frame(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

struct SystemClock;

impl Clock for SystemClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

struct ConsoleKeyboard;

impl KeyboardHost for ConsoleKeyboard {
    fn dismiss(&self) {
        println!("  [host] keyboard dismissed");
    }
}

struct Session {
    runtime: Runtime,
    requests: Arc<FrameRequests>,
    clock: SystemClock,
    started: Instant,
}

impl Session {
    fn new() -> Self {
        let requests = Arc::new(FrameRequests::default());
        let runtime = Runtime::with_scheduler(requests.clone());
        let clock = SystemClock;
        let started = clock.now();
        Self {
            runtime,
            requests,
            clock,
            started,
        }
    }

    /// Produce frames until nothing asks for another one.
    fn pump(&self, sheet: &BottomSheet) -> Result<usize> {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while self.requests.take() {
            if frames == MAX_FRAMES {
                bail!("sheet still animating after {MAX_FRAMES} frames");
            }
            std::thread::sleep(FRAME_INTERVAL);
            handle.drain_frame_callbacks(self.clock.elapsed_nanos(self.started));
            frames += 1;
            log::debug!("frame {frames}: {:?}", sheet.values());
        }
        Ok(frames)
    }
}

fn report(step: &str, sheet: &BottomSheet, frames: usize) {
    let values = sheet.values();
    println!(
        "{step:<22} {:?} after {frames} frames: position={:.1} scrim={:.2} overscroll={:.1} inset={:.1}",
        sheet.state(),
        values.position,
        values.scrim_opacity,
        values.overscroll_height,
        values.keyboard_inset,
    );
}

fn drag(session: &Session, sheet: &BottomSheet, delta_y: f32) -> Result<bool> {
    ensure!(sheet.drag_begin(), "sheet refused a drag in {:?}", sheet.state());
    for step in 1..=10 {
        sheet.drag_update(GestureSample::vertical(delta_y * step as f32 / 10.0));
        session.pump(sheet)?;
    }
    let decision = sheet.drag_end(0.0);
    Ok(decision.is_some_and(|decision| decision.should_dismiss))
}

fn run() -> Result<()> {
    let session = Session::new();
    let closes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&closes);

    let config = SheetConfig::new()
        .should_open(true)
        .render_content(|| println!("  [host] rendering sheet content"))
        .on_close(move || counter.set(counter.get() + 1));
    let host = HostCapabilities::new(800.0)
        .with_keyboard(Rc::new(ConsoleKeyboard))
        .with_back_navigation(true);
    let sheet = BottomSheet::mount(config, host, &session.runtime.handle());
    sheet.on_content_measured(480.0);
    sheet.render_content();

    let frames = session.pump(&sheet)?;
    report("opened", &sheet, frames);
    ensure!(sheet.state() == PresentationState::Open, "sheet did not open");

    sheet.on_keyboard_shown(280.0);
    let frames = session.pump(&sheet)?;
    report("keyboard shown", &sheet, frames);
    println!("  layout: {:?}", sheet.layout());

    sheet.on_content_tapped();
    let frames = session.pump(&sheet)?;
    report("content tapped", &sheet, frames);

    let dismissed = drag(&session, &sheet, 30.0)?;
    let frames = session.pump(&sheet)?;
    report("short drag", &sheet, frames);
    ensure!(!dismissed, "a 30px drag should not dismiss");

    let dismissed = drag(&session, &sheet, 120.0)?;
    let frames = session.pump(&sheet)?;
    report("long drag", &sheet, frames);
    ensure!(dismissed, "a 120px drag should dismiss");
    ensure!(closes.get() == 1, "expected one close, saw {}", closes.get());

    sheet.unmount();
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Slidesheet headless demo ===");
    run()
}
