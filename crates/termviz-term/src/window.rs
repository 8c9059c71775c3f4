// SPDX-License-Identifier: MIT
//
// Window — a bordered rectangle of the terminal with its own cell grid.
//
// The outer frame (border and title) is drawn once, at construction, and is
// never touched again. Everything inside it lives in the window's `Grid`:
// writes mutate cells and set dirty bits, and output happens according to
// the window's `RenderMode`:
//
//   buffered  writes → grid → render() diffs dirty runs → Screen (one write)
//   naive     writes → grid → span encoded right away → Screen (one write)
//
// Interior cell (row, col) of a window whose frame starts at (x, y) sits at
// screen position (x + 1 + col, y + 1 + row), all 0-indexed.
//
// Sequential writers (`print_msg`, `print_line`, `print_fill`) share a row
// cursor. Each call writes one whole row starting at column 0 and advances
// the cursor, wrapping back to the top after the last row, like a ring of
// log lines.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::ansi;
use crate::color::Color;
use crate::diff::{screen_pos, DiffRenderer, RenderStats};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::mode::{RenderMode, Span};
use crate::output::OutputBuffer;
use crate::screen::Screen;

/// Smallest width or height that leaves a 1×1 interior.
pub const MIN_SIDE: u16 = 3;

// ─── Window ──────────────────────────────────────────────────────────────────

/// A bordered, titled region of the terminal.
///
/// ```
/// use termviz_term::color::Color;
/// use termviz_term::screen::{CaptureSink, Screen};
/// use termviz_term::window::Window;
///
/// let sink = CaptureSink::new();
/// let screen = Screen::new(sink.clone());
/// let mut win = Window::new(&screen, 0, 0, 12, 4, "log").unwrap();
/// let _ = sink.take();
///
/// win.print_msg("hello", Color::GREEN).unwrap();
/// let stats = win.render().unwrap();
/// assert_eq!(stats.cells_rendered, 5);
/// assert_eq!(sink.text(), "\x1b[2;2H\x1b[32mhello");
/// ```
pub struct Window {
    screen: Arc<Screen>,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    title: String,
    grid: Grid,
    mode: RenderMode,
    cursor_row: usize,
    renderer: DiffRenderer,
    scratch: OutputBuffer,
}

impl Window {
    /// Create a window with its frame at `(x, y)` (0-indexed) and draw the
    /// border immediately. The window starts in the screen's default mode.
    ///
    /// # Errors
    ///
    /// - [`Error::DegenerateWindow`] if `width` or `height` is below 3.
    /// - [`Error::TooLong`] if `title` is wider than the interior.
    /// - [`Error::Output`] if drawing the border fails.
    pub fn new(
        screen: &Arc<Screen>,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        title: &str,
    ) -> Result<Self> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(Error::DegenerateWindow { width, height });
        }

        let inner = usize::from(width - 2);
        let title_len = title.chars().count();
        if title_len > inner {
            return Err(Error::TooLong {
                len: title_len,
                max: inner,
            });
        }

        let win = Self {
            screen: Arc::clone(screen),
            x,
            y,
            width,
            height,
            title: title.to_owned(),
            grid: Grid::new(usize::from(height - 2), inner),
            mode: screen.options().mode,
            cursor_row: 0,
            renderer: DiffRenderer::new(),
            scratch: OutputBuffer::new(),
        };

        let mut out = OutputBuffer::new();
        win.encode_border(&mut out)?;
        screen.emit(out.as_bytes(), Some(y.saturating_add(height)))?;

        debug!(x, y, width, height, title, mode = %win.mode, "window created");
        Ok(win)
    }

    /// Frame: `+---title---+`, `|` sides, `+-----+` bottom. The title is
    /// centered with the odd leftover column on the right.
    fn encode_border(&self, out: &mut OutputBuffer) -> Result<()> {
        let inner = self.grid.cols();
        let title_len = self.title.chars().count();
        let left = (inner - title_len) / 2;
        let right = inner - title_len - left;

        ansi::color(out, self.screen.palette().resolve(Color::RESET))?;

        ansi::cursor_to(out, self.x, self.y)?;
        out.push_char('+');
        out.push_repeated(b'-', left);
        out.push_str(&self.title);
        out.push_repeated(b'-', right);
        out.push_char('+');

        for i in 1..self.height - 1 {
            ansi::cursor_to(out, self.x, self.y.saturating_add(i))?;
            out.push_char('|');
            out.push_repeated(b' ', inner);
            out.push_char('|');
        }

        ansi::cursor_to(out, self.x, self.y.saturating_add(self.height - 1))?;
        out.push_char('+');
        out.push_repeated(b'-', inner);
        out.push_char('+');
        Ok(())
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Interior row count (`height - 2`).
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Interior column count (`width - 2`).
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Outer width, border included.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Outer height, border included.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Top-left corner of the frame.
    #[must_use]
    pub const fn origin(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Row the next sequential write lands on.
    #[must_use]
    pub const fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// Move the sequential-write cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `row` is not an interior row.
    pub fn set_cursor_row(&mut self, row: usize) -> Result<()> {
        if row >= self.rows() {
            return Err(self.out_of_range(row, 0));
        }
        self.cursor_row = row;
        Ok(())
    }

    /// The interior cells and their dirty bits.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The screen this window prints to.
    #[must_use]
    pub const fn screen(&self) -> &Arc<Screen> {
        &self.screen
    }

    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Change the render mode. Switching never flushes: cells left dirty by
    /// buffered writes stay unrendered until the window is buffered again.
    pub fn set_mode(&mut self, mode: RenderMode) {
        if mode == self.mode {
            return;
        }
        if mode == RenderMode::Naive && self.grid.has_dirty() {
            warn!(
                pending = self.grid.dirty_count(),
                title = %self.title,
                "switching to naive mode with unrendered cells"
            );
        }
        debug!(from = %self.mode, to = %mode, title = %self.title, "render mode changed");
        self.mode = mode;
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Write `text` at `(row, col)`. Text past the right edge is dropped.
    /// Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if `(row, col)` is outside the interior.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn print(&mut self, row: usize, col: usize, text: &str, color: Color) -> Result<usize> {
        if row >= self.rows() || col >= self.cols() {
            return Err(self.out_of_range(row, col));
        }
        let n = self.grid.put_str(row, col, text, color)?;
        self.after_write(row, col, n)?;
        Ok(n)
    }

    /// Write `text` at column 0 of the cursor row and advance the cursor.
    /// Cells past the end of `text` keep their old content.
    ///
    /// # Errors
    ///
    /// - [`Error::TooLong`] if `text` is wider than the interior. Nothing is
    ///   written and the cursor stays put.
    /// - [`Error::Output`] if a naive-mode write fails. The cells stay dirty
    ///   and the cursor stays put.
    pub fn print_msg(&mut self, text: &str, color: Color) -> Result<()> {
        let len = text.chars().count();
        if len > self.cols() {
            return Err(Error::TooLong {
                len,
                max: self.cols(),
            });
        }
        let row = self.cursor_row;
        let n = self.grid.put_str(row, 0, text, color)?;
        self.after_write(row, 0, n)?;
        self.advance();
        Ok(())
    }

    /// Write `text` as a full row: truncated at the right edge, or padded
    /// with spaces to the interior width. Advances the cursor.
    ///
    /// With `strict` set in the screen options, overlong text is rejected
    /// instead of truncated.
    ///
    /// # Errors
    ///
    /// - [`Error::TooLong`] in strict mode for text wider than the interior.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn print_line(&mut self, text: &str, color: Color) -> Result<()> {
        let cols = self.cols();
        if self.screen.options().strict_lines {
            let len = text.chars().count();
            if len > cols {
                return Err(Error::TooLong { len, max: cols });
            }
        }
        let row = self.cursor_row;
        let n = self.grid.put_str(row, 0, text, color)?;
        if n < cols {
            self.grid.fill_span(row, n, cols - n, ' ', color)?;
        }
        self.after_write(row, 0, cols)?;
        self.advance();
        Ok(())
    }

    /// Fill the cursor row with `ch` and advance the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if a naive-mode write fails.
    pub fn print_fill(&mut self, ch: char, color: Color) -> Result<()> {
        let row = self.cursor_row;
        let n = self.grid.fill_span(row, 0, self.cols(), ch, color)?;
        self.after_write(row, 0, n)?;
        self.advance();
        Ok(())
    }

    /// Write one cell.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if `(row, col)` is outside the interior.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn set(&mut self, row: usize, col: usize, ch: char, color: Color) -> Result<()> {
        self.grid.set(row, col, ch, color)?;
        self.after_write(row, col, 1)
    }

    /// Write `len` copies of `ch` from `(row, col)`, truncated at the right
    /// edge. Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if `(row, col)` is outside the interior.
    /// - [`Error::Output`] if a naive-mode write fails.
    pub fn fill(
        &mut self,
        row: usize,
        col: usize,
        len: usize,
        ch: char,
        color: Color,
    ) -> Result<usize> {
        let n = self.grid.fill_span(row, col, len, ch, color)?;
        self.after_write(row, col, n)?;
        Ok(n)
    }

    /// Blank every interior cell. Buffered windows only mark the cells
    /// dirty; naive windows repaint the interior immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if a naive-mode write fails.
    pub fn clear_interior(&mut self) -> Result<()> {
        self.grid.clear();
        for row in 0..self.rows() {
            self.after_write(row, 0, self.cols())?;
        }
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Emit every dirty interior cell. A no-op in naive mode, where writes
    /// are already on screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if writing the frame fails.
    pub fn render(&mut self) -> Result<RenderStats> {
        if !self.mode.strategy().renders_on_demand() {
            return Ok(RenderStats::default());
        }
        let origin = self.interior_origin();
        let stats = self
            .renderer
            .render(&mut self.grid, origin, self.screen.palette());
        self.flush_frame(stats)
    }

    /// Repaint the whole interior regardless of dirty state. Works in
    /// either mode; useful after something else drew over the window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`] if writing the frame fails.
    pub fn render_full(&mut self) -> Result<RenderStats> {
        let origin = self.interior_origin();
        let stats = self
            .renderer
            .render_full(&mut self.grid, origin, self.screen.palette());
        self.flush_frame(stats)
    }

    fn flush_frame(&mut self, stats: RenderStats) -> Result<RenderStats> {
        trace!(
            title = %self.title,
            cells = stats.cells_rendered,
            runs = stats.runs,
            color_changes = stats.color_changes,
            bytes = stats.bytes_written,
            "render pass"
        );
        self.screen.emit(self.renderer.output_bytes(), None)?;
        Ok(stats)
    }

    // ─── Internals ───────────────────────────────────────────────────────

    /// Screen position of interior cell `(0, 0)`.
    const fn interior_origin(&self) -> (u16, u16) {
        (self.x.saturating_add(1), self.y.saturating_add(1))
    }

    fn advance(&mut self) {
        self.cursor_row = (self.cursor_row + 1) % self.grid.rows();
    }

    /// Hand a freshly written span to the mode's strategy. If the strategy
    /// put it on screen, its dirty bits are cleared; on a write failure they
    /// stay set so a later render can retry.
    fn after_write(&mut self, row: usize, col: usize, len: usize) -> Result<()> {
        if len == 0 {
            return Ok(());
        }
        let cells = self
            .grid
            .row(row)
            .and_then(|r| r.get(col..col + len))
            .unwrap_or_default();
        let (x, y) = screen_pos(self.interior_origin(), row, col);

        self.scratch.clear();
        let span = Span { x, y, cells };
        if self
            .mode
            .strategy()
            .on_write(span, self.screen.palette(), &mut self.scratch)
        {
            self.screen.emit(self.scratch.as_bytes(), None)?;
            self.grid.clean_span(row, col, len);
        }
        Ok(())
    }

    fn out_of_range(&self, row: usize, col: usize) -> Error {
        Error::OutOfRange {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("origin", &(self.x, self.y))
            .field("size", &(self.width, self.height))
            .field("mode", &self.mode)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

/// Leave the terminal in the neutral color, like the border left it.
impl Drop for Window {
    fn drop(&mut self) {
        let mut out = OutputBuffer::new();
        if ansi::color(&mut out, self.screen.palette().resolve(Color::RESET)).is_ok() {
            let _ = self.screen.emit(out.as_bytes(), None);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::screen::CaptureSink;
    use pretty_assertions::assert_eq;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// A sink that fails every write while its switch is on.
    #[derive(Clone, Default)]
    struct Flaky(Arc<AtomicBool>);

    impl Write for Flaky {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if self.0.load(Ordering::Relaxed) {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            } else {
                Ok(data.len())
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Screen + sink + one window, with the border output discarded.
    fn setup(width: u16, height: u16) -> (CaptureSink, Window) {
        setup_with(width, height, Options::default())
    }

    fn setup_with(width: u16, height: u16, opts: Options) -> (CaptureSink, Window) {
        let sink = CaptureSink::new();
        let screen = Screen::with_options(sink.clone(), opts);
        let win = Window::new(&screen, 0, 0, width, height, "").unwrap();
        let _ = sink.take();
        (sink, win)
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn degenerate_geometry_rejected() {
        let screen = Screen::new(CaptureSink::new());
        for (w, h) in [(2, 10), (10, 2), (0, 0)] {
            let err = Window::new(&screen, 0, 0, w, h, "").unwrap_err();
            assert!(matches!(err, Error::DegenerateWindow { .. }));
        }
        assert!(Window::new(&screen, 0, 0, 3, 3, "").is_ok());
    }

    #[test]
    fn interior_is_outer_minus_border() {
        let (_, win) = setup(20, 10);
        assert_eq!((win.rows(), win.cols()), (8, 18));
        assert_eq!((win.width(), win.height()), (20, 10));
    }

    #[test]
    fn border_with_centered_title() {
        let sink = CaptureSink::new();
        let screen = Screen::new(sink.clone());
        let _win = Window::new(&screen, 2, 1, 9, 3, "ab").unwrap();

        // Inner width 7, title 2: left pad 2, right pad 3.
        assert_eq!(
            sink.text(),
            "\x1b[37m\x1b[2;3H+--ab---+\x1b[3;3H|       |\x1b[4;3H+-------+"
        );
    }

    #[test]
    fn border_without_title() {
        let sink = CaptureSink::new();
        let screen = Screen::new(sink.clone());
        let _win = Window::new(&screen, 0, 0, 4, 3, "").unwrap();
        assert_eq!(sink.text(), "\x1b[37m\x1b[1;1H+--+\x1b[2;1H|  |\x1b[3;1H+--+");
    }

    #[test]
    fn title_wider_than_interior_rejected() {
        let sink = CaptureSink::new();
        let screen = Screen::new(sink.clone());
        let err = Window::new(&screen, 0, 0, 6, 3, "toolong").unwrap_err();
        assert!(matches!(err, Error::TooLong { len: 7, max: 4 }));
        assert!(sink.is_empty());
        assert!(Window::new(&screen, 0, 0, 6, 3, "four").is_ok());
    }

    #[test]
    fn watermark_tracks_lowest_window() {
        let screen = Screen::new(CaptureSink::new());
        Window::new(&screen, 0, 0, 10, 5, "").unwrap();
        Window::new(&screen, 20, 8, 10, 4, "").unwrap();
        Window::new(&screen, 40, 0, 10, 6, "").unwrap();
        assert_eq!(screen.watermark(), 12);
    }

    #[test]
    fn window_starts_in_screen_default_mode() {
        let (_, win) = setup_with(5, 5, Options::parse("mode=naive").unwrap());
        assert_eq!(win.mode(), RenderMode::Naive);
    }

    // ── print ───────────────────────────────────────────────────────────

    #[test]
    fn print_then_render_then_idle() {
        let (sink, mut win) = setup(10, 4);
        win.print(1, 2, "hi", Color::RED).unwrap();
        assert!(sink.is_empty(), "buffered writes must not print");

        let stats = win.render().unwrap();
        assert_eq!(stats.cells_rendered, 2);
        assert_eq!(sink.take(), b"\x1b[3;4H\x1b[31mhi");
        assert_eq!(win.grid().row_text(1).unwrap(), "  hi    ");

        let again = win.render().unwrap();
        assert!(again.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn print_truncates_at_edge() {
        let (_, mut win) = setup(6, 3);
        assert_eq!(win.print(0, 2, "abcdef", Color::RESET).unwrap(), 2);
        assert_eq!(win.grid().row_text(0).unwrap(), "  ab");
    }

    #[test]
    fn print_start_outside_interior_fails() {
        let (_, mut win) = setup(6, 4);
        assert!(matches!(
            win.print(2, 0, "x", Color::RESET).unwrap_err(),
            Error::OutOfRange { row: 2, col: 0, rows: 2, cols: 4 }
        ));
        assert!(matches!(
            win.print(0, 4, "x", Color::RESET).unwrap_err(),
            Error::OutOfRange { .. }
        ));
        assert!(!win.grid().has_dirty());
    }

    // ── Sequential writes ───────────────────────────────────────────────

    #[test]
    fn print_msg_rejects_overlong_text() {
        let (_, mut win) = setup(6, 4);
        let err = win.print_msg("12345", Color::RESET).unwrap_err();
        assert!(matches!(err, Error::TooLong { len: 5, max: 4 }));
        assert_eq!(win.cursor_row(), 0);
        assert!(!win.grid().has_dirty());
    }

    #[test]
    fn sequential_writes_wrap_around_rows() {
        let (_, mut win) = setup(8, 5);
        for line in ["a", "b", "c", "d"] {
            win.print_msg(line, Color::RESET).unwrap();
        }
        assert_eq!(win.cursor_row(), 1);
        assert_eq!(win.grid().row_text(0).unwrap(), "d     ");
        assert_eq!(win.grid().row_text(1).unwrap(), "b     ");
    }

    #[test]
    fn print_line_pads_and_truncates() {
        let (_, mut win) = setup(7, 4);
        win.print(0, 0, "xxxxx", Color::RESET).unwrap();
        win.print_line("ab", Color::BLUE).unwrap();
        win.print_line("abcdefgh", Color::BLUE).unwrap();

        assert_eq!(win.grid().row_text(0).unwrap(), "ab   ");
        assert_eq!(win.grid().get(0, 4).unwrap().color, Color::BLUE);
        assert_eq!(win.grid().row_text(1).unwrap(), "abcde");
    }

    #[test]
    fn strict_print_line_rejects_overlong_text() {
        let (_, mut win) = setup_with(7, 4, Options::parse("strict").unwrap());
        let err = win.print_line("abcdefgh", Color::RESET).unwrap_err();
        assert!(matches!(err, Error::TooLong { len: 8, max: 5 }));
        win.print_line("abcde", Color::RESET).unwrap();
    }

    #[test]
    fn print_fill_covers_row() {
        let (_, mut win) = setup(6, 4);
        win.print_fill('-', Color::YELLOW).unwrap();
        assert_eq!(win.grid().row_text(0).unwrap(), "----");
        assert_eq!(win.cursor_row(), 1);
    }

    #[test]
    fn set_cursor_row_validates() {
        let (_, mut win) = setup(6, 4);
        win.set_cursor_row(1).unwrap();
        assert!(win.set_cursor_row(2).is_err());
        win.print_msg("x", Color::RESET).unwrap();
        assert_eq!(win.cursor_row(), 0);
    }

    // ── Naive mode ──────────────────────────────────────────────────────

    #[test]
    fn naive_writes_print_immediately() {
        let (sink, mut win) = setup(10, 4);
        win.set_mode(RenderMode::Naive);

        win.print(0, 1, "ok", Color::GREEN).unwrap();
        assert_eq!(sink.take(), b"\x1b[2;3H\x1b[32mok");
        assert!(!win.grid().has_dirty());

        assert!(win.render().unwrap().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn switching_to_naive_keeps_pending_cells_dirty() {
        let (sink, mut win) = setup(10, 4);
        win.print(0, 0, "old", Color::RESET).unwrap();
        win.set_mode(RenderMode::Naive);
        win.print(1, 0, "new", Color::RESET).unwrap();

        assert_eq!(win.grid().dirty_count(), 3);
        assert_eq!(sink.take(), b"\x1b[3;2H\x1b[37mnew");

        win.set_mode(RenderMode::Buffered);
        let stats = win.render().unwrap();
        assert_eq!(stats.cells_rendered, 3);
        assert_eq!(sink.take(), b"\x1b[2;2H\x1b[37mold");
    }

    #[test]
    fn naive_clear_interior_repaints_every_row() {
        let (sink, mut win) = setup(5, 4);
        win.set_mode(RenderMode::Naive);
        win.clear_interior().unwrap();
        assert_eq!(
            sink.text(),
            "\x1b[2;2H\x1b[37m   \x1b[3;2H\x1b[37m   "
        );
        assert!(!win.grid().has_dirty());
    }

    #[test]
    fn failed_naive_write_keeps_cursor_and_dirty_cells() {
        let sink = Flaky::default();
        let screen = Screen::with_options(sink.clone(), Options::parse("mode=naive").unwrap());
        let mut win = Window::new(&screen, 0, 0, 8, 5, "").unwrap();

        sink.0.store(true, Ordering::Relaxed);
        let err = win.print_msg("abc", Color::RESET).unwrap_err();
        assert!(err.is_output());
        assert_eq!(win.cursor_row(), 0);
        assert_eq!(win.grid().dirty_count(), 3);

        assert!(win.print_line("abc", Color::RESET).is_err());
        assert!(win.print_fill('-', Color::RESET).is_err());
        assert_eq!(win.cursor_row(), 0);

        sink.0.store(false, Ordering::Relaxed);
        win.print_msg("xyz", Color::RESET).unwrap();
        assert_eq!(win.cursor_row(), 1);
        assert_eq!(win.grid().row_text(0).unwrap(), "xyz---");
    }

    // ── Buffered rendering ──────────────────────────────────────────────

    #[test]
    fn buffered_clear_interior_only_marks_dirty() {
        let (sink, mut win) = setup(5, 4);
        win.clear_interior().unwrap();
        assert!(sink.is_empty());
        assert_eq!(win.grid().dirty_count(), 6);
    }

    #[test]
    fn render_full_repaints_clean_interior() {
        let (sink, mut win) = setup(4, 3);
        let stats = win.render_full().unwrap();
        assert_eq!(stats.cells_rendered, 2);
        assert_eq!(sink.text(), "\x1b[2;2H\x1b[37m  ");
    }

    #[test]
    fn render_uses_screen_palette() {
        let (sink, mut win) = setup_with(6, 3, Options::parse("red=#ff0000").unwrap());
        win.print(0, 0, "r", Color::RED).unwrap();
        win.render().unwrap();
        assert_eq!(sink.text(), "\x1b[2;2H\x1b[38;2;255;0;0mr");
    }

    #[test]
    fn fill_and_set_go_through_the_grid() {
        let (_, mut win) = setup(8, 4);
        assert_eq!(win.fill(1, 4, 10, '#', Color::MAGENTA).unwrap(), 2);
        win.set(0, 0, '*', Color::RED).unwrap();
        assert!(matches!(
            win.set(2, 0, '*', Color::RED).unwrap_err(),
            Error::OutOfBounds { .. }
        ));
        assert_eq!(win.grid().row_text(1).unwrap(), "    ##");
        assert_eq!(win.grid().dirty_count(), 3);
    }

    #[test]
    fn drop_restores_neutral_color() {
        let (sink, win) = setup_with(6, 3, Options::parse("reset=#eeeeee").unwrap());
        drop(win);
        assert_eq!(sink.text(), "\x1b[38;2;238;238;238m");
    }

    #[test]
    fn window_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Window>();
    }
}
