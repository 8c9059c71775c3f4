// SPDX-License-Identifier: MIT
//
// Dirty-run renderer — converts a grid's pending changes into terminal bytes.
//
// Instead of redrawing a window's interior every frame, we walk its dirty
// bits and emit escape sequences only for cells that were written since the
// last pass. A status line that changes one digit costs one cursor move, one
// color escape, and one byte.
//
// The pipeline per frame:
//
//   1. Primitives write cells into the window's Grid (dirty bits set).
//   2. DiffRenderer.render() scans the grid row-major. Each maximal run of
//      dirty cells in a row becomes one RunWriter run: a single cursor move,
//      then characters with color escapes only at color boundaries.
//   3. Every emitted cell has its dirty bit cleared.
//   4. All output accumulates in OutputBuffer — zero writes to the terminal.
//   5. The window hands the buffer to the Screen, which writes it in one
//      call under the shared lock.
//
// A pass over a grid with no dirty cells produces zero bytes, so rendering
// twice in a row without writes in between is free and idempotent.

use std::io::{self, Write};

use crate::color::Palette;
use crate::grid::Grid;
use crate::output::{OutputBuffer, RunWriter};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Statistics from a render pass, for profiling and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Dirty cells emitted.
    pub cells_rendered: usize,
    /// Maximal dirty runs found (one cursor move each).
    pub runs: usize,
    /// Color escapes emitted.
    pub color_changes: usize,
    /// Total bytes of ANSI output generated.
    pub bytes_written: usize,
}

impl RenderStats {
    /// Whether the pass produced no output at all.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes_written == 0
    }
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Renders the dirty cells of a [`Grid`] placed at a screen origin.
///
/// # Usage
///
/// ```
/// use termviz_term::color::{Color, Palette};
/// use termviz_term::diff::DiffRenderer;
/// use termviz_term::grid::Grid;
///
/// let mut grid = Grid::new(2, 8);
/// grid.put_str(0, 0, "ok", Color::GREEN).unwrap();
///
/// let mut renderer = DiffRenderer::new();
/// let stats = renderer.render(&mut grid, (1, 1), &Palette::standard());
/// assert_eq!(stats.cells_rendered, 2);
/// assert_eq!(renderer.output_bytes(), b"\x1b[2;2H\x1b[32mok");
///
/// // Nothing changed since: the next pass is empty.
/// assert!(renderer.render(&mut grid, (1, 1), &Palette::standard()).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: RunWriter,
}

impl DiffRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: RunWriter::new(),
        }
    }

    /// Emit every dirty cell of `grid` and clear the bits it emitted.
    ///
    /// `origin` is the absolute, 0-indexed screen position of grid cell
    /// `(0, 0)`. Output replaces whatever the previous pass left in the
    /// buffer; use [`flush_to`](Self::flush_to) to write it out.
    pub fn render(&mut self, grid: &mut Grid, origin: (u16, u16), palette: &Palette) -> RenderStats {
        self.output.clear();
        self.writer.reset();

        let cols = grid.cols();
        for row in 0..grid.rows() {
            let (cells, dirty) = grid.row_parts_mut(row);

            let mut col = 0;
            while col < cols {
                if !dirty[col] {
                    col += 1;
                    continue;
                }

                let start = col;
                while col < cols && dirty[col] {
                    col += 1;
                }

                let (x, y) = screen_pos(origin, row, start);
                self.writer
                    .write_run(&mut self.output, palette, x, y, &cells[start..col]);
                dirty[start..col].fill(false);
            }
        }

        RenderStats {
            cells_rendered: self.writer.cells(),
            runs: self.writer.runs(),
            color_changes: self.writer.color_changes(),
            bytes_written: self.output.len(),
        }
    }

    /// Mark every cell dirty, then [`render`](Self::render). Guarantees a
    /// full repaint of the interior regardless of what the terminal shows.
    pub fn render_full(
        &mut self,
        grid: &mut Grid,
        origin: (u16, u16),
        palette: &Palette,
    ) -> RenderStats {
        grid.mark_all_dirty();
        self.render(grid, origin, palette)
    }

    /// The raw ANSI bytes from the last render (for testing and debugging).
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Write accumulated output to `w` and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut (impl Write + ?Sized)) -> io::Result<()> {
        self.output.flush_to(w)
    }
}

/// Absolute screen position of grid cell `(row, col)`. Saturates instead of
/// wrapping; grids are sized from `u16` window geometry so this never
/// triggers for a valid window.
#[inline]
pub(crate) fn screen_pos(origin: (u16, u16), row: usize, col: usize) -> (u16, u16) {
    let col = u16::try_from(col).unwrap_or(u16::MAX);
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    (origin.0.saturating_add(col), origin.1.saturating_add(row))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
