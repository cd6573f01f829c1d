use slidesheet_testing::SheetTestRule;
use slidesheet_ui::{
    release_decision, transition, GestureSample, PresentationState, SheetConfig, SheetEvent,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DRAG_STEP_SAMPLES: &[usize] = &[8, 64, 256];

fn bench_transition_table(c: &mut Criterion) {
    let states = [
        PresentationState::Closed,
        PresentationState::Opening,
        PresentationState::Open,
        PresentationState::Dragging,
        PresentationState::Closing,
    ];
    let events = [
        SheetEvent::OpenRequested,
        SheetEvent::CloseRequested,
        SheetEvent::ScrimTapped,
        SheetEvent::BackPressed,
        SheetEvent::DragStarted,
        SheetEvent::DragReleased(release_decision(60.0, 500.0, false, 0.0)),
        SheetEvent::OpenSettled,
        SheetEvent::CloseSettled,
    ];
    c.bench_function("transition_table", |b| {
        b.iter(|| {
            for state in states {
                for event in events {
                    black_box(transition(black_box(state), black_box(event), false));
                }
            }
        });
    });
}

fn bench_drag_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_updates");
    for &steps in DRAG_STEP_SAMPLES {
        group.bench_with_input(BenchmarkId::new("steps", steps), &steps, |b, &steps| {
            let mut rule = SheetTestRule::new(SheetConfig::new());
            rule.sheet().on_content_measured(500.0);
            rule.open_and_settle();
            b.iter(|| {
                let sheet = rule.sheet();
                sheet.drag_begin();
                for step in 0..steps {
                    sheet.drag_update(GestureSample::vertical(step as f32 * 0.1));
                }
                black_box(sheet.drag_end(0.0));
                sheet.drag_begin();
                sheet.drag_cancel();
            });
        });
    }
    group.finish();
}

fn bench_open_close_cycle(c: &mut Criterion) {
    c.bench_function("open_close_cycle", |b| {
        let mut rule = SheetTestRule::new(SheetConfig::new());
        rule.sheet().on_content_measured(500.0);
        b.iter(|| {
            rule.open_and_settle();
            rule.sheet().set_should_open(false);
            black_box(rule.run_until_idle());
        });
    });
}

criterion_group!(
    drag,
    bench_transition_table,
    bench_drag_updates,
    bench_open_close_cycle
);
criterion_main!(drag);
