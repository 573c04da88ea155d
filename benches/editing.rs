//! Benchmarks for editing operations.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathline::controller::{EditorController, KEY_BACKSPACE, KEY_LEFT};
use mathline::editor::{CommandTemplate, EditorState, erase, insert_command};

fn nested_fractions(depth: usize) -> EditorState {
    let frac = CommandTemplate::new("\\frac", 2).unwrap();
    (0..depth).fold(EditorState::new(), |state, _| insert_command(&state, &frac))
}

fn bench_typing_burst(c: &mut Criterion) {
    let burst = "x^2+2xy+y^2=".repeat(20);
    c.bench_function("typing_burst", |b| {
        b.iter(|| {
            let mut controller = EditorController::default();
            controller.handle_key(None, Some(black_box(&burst)));
            controller
        });
    });
}

fn bench_navigate_long_line(c: &mut Criterion) {
    let markup = "\\frac{a}{\\sqrt{b}}+".repeat(50);
    c.bench_function("navigate_long_line", |b| {
        b.iter(|| {
            let mut controller = EditorController::default();
            controller.handle_key(None, Some(&markup));
            for _ in 0..200 {
                controller.handle_key(Some(black_box(KEY_LEFT)), None);
            }
            controller
        });
    });
}

fn bench_command_erase(c: &mut Criterion) {
    let state = nested_fractions(32);
    c.bench_function("command_erase", |b| b.iter(|| erase(black_box(&state))));
}

fn bench_erase_session(c: &mut Criterion) {
    c.bench_function("erase_session", |b| {
        b.iter(|| {
            let mut controller = EditorController::default();
            for _ in 0..16 {
                controller.handle_key(Some(70), None);
                controller.handle_key(None, Some("1"));
            }
            for _ in 0..48 {
                controller.handle_key(Some(black_box(KEY_BACKSPACE)), None);
            }
            controller
        });
    });
}

criterion_group!(
    benches,
    bench_typing_burst,
    bench_navigate_long_line,
    bench_command_erase,
    bench_erase_session
);
criterion_main!(benches);
