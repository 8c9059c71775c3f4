//! Progress readouts pulled from a live value.
//!
//! The drawn bar is one row of a window: `floor(width · percent / 100)` fill
//! cells, the rest track cells, and optionally a right-aligned ` NN%` label.
//! The value comes from a [`ValueProvider`] that is queried exactly once per
//! draw, before any cell is written and outside every lock, so a slow or
//! contended source never holds up other windows.

use std::sync::atomic::{AtomicI64, AtomicU8, AtomicUsize, Ordering};

use termviz_term::color::Color;
use termviz_term::window::Window;
use termviz_term::{Error, Result};

/// Width of the ` NN%` label, room for ` 100%`.
pub const LABEL_WIDTH: usize = 5;

// ─── ValueProvider ───────────────────────────────────────────────────────────

/// A source of the current percentage.
pub trait ValueProvider {
    /// The current value. Anything outside `0..=100` is rejected by the
    /// drawing code.
    fn percent(&self) -> i64;
}

impl<T: ValueProvider + ?Sized> ValueProvider for &T {
    fn percent(&self) -> i64 {
        (**self).percent()
    }
}

impl ValueProvider for i64 {
    fn percent(&self) -> i64 {
        *self
    }
}

impl ValueProvider for AtomicI64 {
    fn percent(&self) -> i64 {
        self.load(Ordering::Relaxed)
    }
}

impl ValueProvider for AtomicU8 {
    fn percent(&self) -> i64 {
        i64::from(self.load(Ordering::Relaxed))
    }
}

impl ValueProvider for AtomicUsize {
    fn percent(&self) -> i64 {
        i64::try_from(self.load(Ordering::Relaxed)).unwrap_or(i64::MAX)
    }
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// Layout of a progress bar.
///
/// ```
/// use termviz_plot::Progress;
/// use termviz_term::color::Color;
/// use termviz_term::screen::{CaptureSink, Screen};
/// use termviz_term::window::Window;
///
/// let screen = Screen::new(CaptureSink::new());
/// let mut win = Window::new(&screen, 0, 0, 22, 3, "load").unwrap();
///
/// let bar = Progress::new().fill('=').track('.').label(true);
/// let filled = bar.draw(&mut win, &50_i64).unwrap();
/// assert_eq!(filled, 7);
/// assert_eq!(win.grid().row_text(0).unwrap(), "=======........  50%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    row: usize,
    width: Option<usize>,
    fill: char,
    track: char,
    color: Color,
    track_color: Color,
    label: bool,
}

impl Progress {
    /// A full-width `#` bar on row 0, blank track, no label.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            row: 0,
            width: None,
            fill: '#',
            track: ' ',
            color: Color::GREEN,
            track_color: Color::RESET,
            label: false,
        }
    }

    /// Interior row to draw on.
    #[must_use]
    pub const fn row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Bar width in cells, label excluded. Defaults to whatever the
    /// interior leaves after the label.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub const fn fill(mut self, ch: char) -> Self {
        self.fill = ch;
        self
    }

    /// Character for the unfilled part.
    #[must_use]
    pub const fn track(mut self, ch: char) -> Self {
        self.track = ch;
        self
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Append a ` NN%` label after the bar.
    #[must_use]
    pub const fn label(mut self, on: bool) -> Self {
        self.label = on;
        self
    }

    /// Sample `source` once and draw. Returns the number of filled cells.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the sampled value is outside
    ///   `0..=100`. Nothing is drawn.
    /// - [`Error::OutOfBounds`] if the row is not an interior row or the bar
    ///   plus label is wider than the interior.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn draw(&self, win: &mut Window, source: &impl ValueProvider) -> Result<usize> {
        let percent = source.percent();
        let percent = usize::try_from(percent)
            .ok()
            .filter(|&p| p <= 100)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("progress {percent} outside 0..=100"))
            })?;

        let label_width = if self.label { LABEL_WIDTH } else { 0 };
        let cols = win.cols();
        let width = self
            .width
            .unwrap_or_else(|| cols.saturating_sub(label_width));
        let total = width.saturating_add(label_width);
        if self.row >= win.rows() || total > cols {
            return Err(Error::OutOfBounds {
                row: self.row,
                col: total,
                rows: win.rows(),
                cols,
            });
        }

        let filled = width * percent / 100;
        if filled > 0 {
            win.fill(self.row, 0, filled, self.fill, self.color)?;
        }
        if filled < width {
            win.fill(self.row, filled, width - filled, self.track, self.track_color)?;
        }
        if self.label {
            win.print(self.row, width, &format!(" {percent:>3}%"), self.color)?;
        }

        tracing::trace!(percent, filled, width, "progress drawn");
        Ok(filled)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
