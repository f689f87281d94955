//! Benchmarks for drawer gesture, settle and render paths
//!
//! Run with: cargo bench motion

use std::time::Duration;

use edgedrawer::config::DrawerConfig;
use edgedrawer::geometry::Size;
use edgedrawer::messages::PointerEvent;
use edgedrawer::model::DrawerLayout;
use edgedrawer::panel::Gravity;
use edgedrawer::render::paint::{paint_frame, Canvas};
use edgedrawer::theme::Theme;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn make_layout() -> DrawerLayout {
    let mut layout = DrawerLayout::new(DrawerConfig::default());
    let _ = layout.attach_content(Size::new(1920.0, 1080.0));
    let _ = layout.attach_drawer(Gravity::Left, Size::new(320.0, 1080.0));
    let _ = layout.attach_drawer(Gravity::Right, Size::new(320.0, 1080.0));
    let _ = layout.attach_drawer(Gravity::Bottom, Size::new(1920.0, 400.0));
    layout.set_container_size(Size::new(1920.0, 1080.0));
    layout
}

/// Tick frames until every drawer is idle, returning the frame count
fn run_to_idle(layout: &mut DrawerLayout) -> usize {
    let mut now = layout.model().now();
    let mut frames = 0;
    while frames < 500 {
        now += Duration::from_millis(16);
        frames += 1;
        if !layout.frame(now).needs_frame() {
            break;
        }
    }
    frames
}

// ============================================================================
// Gestures
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn edge_drag(moves: usize) {
    let mut layout = make_layout();
    let ms = Duration::from_millis;
    layout.handle_pointer(PointerEvent::down(0, 5.0, 500.0, ms(0)));
    for i in 0..moves {
        let x = 5.0 + (i % 300) as f32;
        layout.handle_pointer(PointerEvent::moved(0, x, 500.0, ms(1 + i as u64)));
    }
    layout.handle_pointer(PointerEvent::up(0, 150.0, 500.0, ms(1 + moves as u64)));
    divan::black_box(&layout);
}

// ============================================================================
// Settling
// ============================================================================

#[divan::bench]
fn open_and_settle() {
    let mut layout = make_layout();
    let _ = layout.open(Gravity::Left);
    divan::black_box(run_to_idle(&mut layout));
}

#[divan::bench]
fn ping_pong_all_edges() {
    let mut layout = make_layout();
    for gravity in [Gravity::Left, Gravity::Right, Gravity::Bottom] {
        let _ = layout.open(gravity);
        run_to_idle(&mut layout);
    }
    layout.close_all();
    divan::black_box(run_to_idle(&mut layout));
}

// ============================================================================
// Rendering
// ============================================================================

#[divan::bench]
fn compute_render_state(bencher: divan::Bencher) {
    let mut layout = make_layout();
    let _ = layout.open(Gravity::Right);
    run_to_idle(&mut layout);
    bencher.bench_local(|| divan::black_box(layout.render_state()));
}

#[divan::bench(args = [(800, 600), (1920, 1080)])]
fn paint_full_frame(bencher: divan::Bencher, (width, height): (usize, usize)) {
    let mut layout = make_layout();
    let _ = layout.open(Gravity::Left);
    run_to_idle(&mut layout);
    let state = layout.render_state();
    let theme = Theme::default();
    let mut pixels = vec![0u32; width * height];

    bencher.bench_local(|| {
        let mut canvas = Canvas::new(&mut pixels, width, height);
        paint_frame(&mut canvas, &state, &theme);
    });
}
