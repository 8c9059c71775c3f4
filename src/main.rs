// SPDX-License-Identifier: MIT
//
// termviz — a small dashboard that exercises every piece of the engine.
//
// This is the demo binary that wires the two crates together:
//
//   termviz-term → screen, windows, grid, diff renderer
//   termviz-plot → rectangles, bars, wrapped text, progress, wireframes
//
// Layout (0-indexed screen positions):
//
//   ┌ Logs ─────────────────┐ ┌ Cube ─────────────┐
//   │ sequential log lines  │ │ rotating          │
//   └───────────────────────┘ │ wireframe, drawn  │
//   ┌ Visualizer ───────────┐ │ from its own      │
//   │ animated bar chart    │ │ thread            │
//   └───────────────────────┘ └───────────────────┘
//   ┌ Progress ─────────────────────────────────────┐
//   └───────────────────────────────────────────────┘
//
// The cube window is moved into a second thread; both threads print through
// the same `Screen`, whose lock keeps their frames from interleaving. The
// cube thread publishes its progress through an atomic that the main thread
// reads back as a `ValueProvider`.
//
// Usage: `termviz [FRAMES]`. Options come from `TERMVIZ_OPTIONS` (for
// example `mode=naive red=#ff5555`), logs go to stderr and are filtered by
// `RUST_LOG`.

use std::env;
use std::process;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use termviz_plot::{
    draw_bars, draw_rectangle, max_bars, wrap_text, Axis, Progress, Projection, Rect, Wireframe,
};
use termviz_term::color::Color;
use termviz_term::options::Options;
use termviz_term::screen::{self, Screen};
use termviz_term::window::Window;
use termviz_term::Result;

/// Roughly 30 frames per second.
const FRAME: Duration = Duration::from_millis(33);

const DEFAULT_FRAMES: usize = 150;

/// Columns × rows the layout needs.
const LAYOUT: (u16, u16) = (92, 23);

const BAR_WIDTH: usize = 2;

const BAR_COLORS: [Color; 6] = [
    Color::RED,
    Color::ORANGE,
    Color::YELLOW,
    Color::GREEN,
    Color::BLUE,
    Color::MAGENTA,
];

fn main() {
    init_logging();

    let frames = match env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            eprintln!("termviz: frame count must be a number, got `{arg}`");
            process::exit(2);
        }),
        None => DEFAULT_FRAMES,
    };

    if let Err(e) = run(frames) {
        eprintln!("termviz: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so they never land inside a frame on stdout.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(frames: usize) -> Result<()> {
    let options = match env::var("TERMVIZ_OPTIONS") {
        Ok(directives) => Options::parse(&directives)?,
        Err(_) => Options::default(),
    };
    info!(%options, frames, "starting");

    let screen = Screen::stdout(options);
    match screen::get_size() {
        Some(size) if size.cols < LAYOUT.0 || size.rows < LAYOUT.1 => {
            warn!(cols = size.cols, rows = size.rows, "terminal smaller than the layout");
        }
        None if !screen::is_tty() => warn!("stdout is not a terminal"),
        _ => {}
    }
    screen.clear_screen()?;

    let mut logs = Window::new(&screen, 0, 0, 50, 8, "Logs")?;
    let mut vis = Window::new(&screen, 0, 9, 50, 10, "Visualizer")?;
    let cube = Window::new(&screen, 51, 0, 41, 19, "Cube")?;
    let mut status = Window::new(&screen, 0, 20, LAYOUT.0, 3, "Progress")?;

    logs.print_line("Starting application...", Color::RESET)?;
    logs.print_line("Loading resources...", Color::YELLOW)?;
    logs.render()?;

    draw_rectangle(&mut vis, Rect::new(1, 1, 20, 4), Color::GREEN, '#')?;
    vis.render()?;

    let done = Arc::new(AtomicU8::new(0));
    let spinner = {
        let done = Arc::clone(&done);
        thread::spawn(move || spin_cube(cube, frames, &done))
    };

    let bars = max_bars(&vis, BAR_WIDTH);
    let colors: Vec<Color> = (0..bars).map(|i| BAR_COLORS[i % BAR_COLORS.len()]).collect();
    let progress = Progress::new().track('.').label(true);

    for frame in 0..frames {
        let heights: Vec<usize> = (0..bars).map(|i| wave(frame, i, vis.rows())).collect();
        draw_bars(&mut vis, &heights, BAR_WIDTH, &colors, '#')?;
        vis.render()?;

        progress.draw(&mut status, &*done)?;
        status.render()?;

        if frame % 30 == 0 {
            logs.print_line(&format!("frame {frame}/{frames}"), Color::BLUE)?;
            logs.render()?;
        }
        thread::sleep(FRAME);
    }

    match spinner.join() {
        Ok(result) => result?,
        Err(_) => warn!("cube thread panicked"),
    }

    wrap_text(
        &mut logs,
        "Done. Every frame above was a diff: only cells that changed since the previous render were written.",
        Color::GREEN,
    )?;
    logs.render()?;

    screen.reset_cursor()
}

/// Spin a cube in its own window, publishing completion in percent.
#[allow(clippy::cast_precision_loss)]
fn spin_cube(mut win: Window, frames: usize, done: &AtomicU8) -> Result<()> {
    let model = Wireframe::cube(1.0);
    let projection = Projection::fit(&win, 2.0, 5.0);

    for frame in 0..frames {
        let angle = frame as f64 * 4.0;
        win.clear_interior()?;
        model.draw(
            &mut win,
            &projection,
            &[(Axis::X, angle * 0.5), (Axis::Y, angle)],
            '*',
            Color::ORANGE,
        )?;
        win.render()?;

        let percent = (frame + 1) * 100 / frames;
        done.store(u8::try_from(percent).unwrap_or(100), Ordering::Relaxed);
        thread::sleep(FRAME);
    }
    Ok(())
}

/// Height of bar `bar` at `frame`: a travelling sine wave over `rows`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn wave(frame: usize, bar: usize, rows: usize) -> usize {
    let t = (frame as f64).mul_add(0.15, bar as f64 * 0.6);
    ((t.sin() + 1.0) / 2.0 * rows as f64).round() as usize
}

// ─── Tests ──────────────────────────────────────────────────────────────────
