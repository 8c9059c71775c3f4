//! Solid rectangles.
//!
//! Unlike the bar chart, a rectangle never clips: if any part of it would
//! fall outside the interior the call fails and nothing is drawn.

use termviz_term::color::Color;
use termviz_term::window::Window;
use termviz_term::{Error, Result};

/// An axis-aligned block of interior cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top row.
    pub row: usize,
    /// Left column.
    pub col: usize,
    /// Width in columns.
    pub width: usize,
    /// Height in rows.
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// Whether the rectangle has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether every cell lies inside a `rows × cols` grid.
    #[must_use]
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        let right = self.col.checked_add(self.width);
        let bottom = self.row.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= cols && b <= rows)
    }
}

/// Fill `rect` with `fill` in `color`.
///
/// An empty rectangle is a no-op, even when positioned outside the
/// interior.
///
/// # Errors
///
/// - [`Error::OutOfBounds`] if the rectangle extends past the interior on
///   any side. The window is left untouched.
/// - [`Error::Output`] if a naive-mode write fails.
pub fn draw_rectangle(win: &mut Window, rect: Rect, color: Color, fill: char) -> Result<()> {
    if rect.is_empty() {
        return Ok(());
    }
    if !rect.fits(win.rows(), win.cols()) {
        return Err(Error::OutOfBounds {
            row: rect.row.saturating_add(rect.height - 1),
            col: rect.col.saturating_add(rect.width - 1),
            rows: win.rows(),
            cols: win.cols(),
        });
    }

    for row in rect.row..rect.row + rect.height {
        win.fill(row, rect.col, rect.width, fill, color)?;
    }
    Ok(())
}
