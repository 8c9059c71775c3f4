// SPDX-License-Identifier: MIT
//
// Output buffering and run-coalesced cell encoding.
//
// Two components work together to minimize terminal I/O:
//
//   OutputBuffer — accumulates all ANSI bytes in memory so a whole render
//   pass (or a whole naive-mode write) reaches the terminal in one write
//   while the screen lock is held. Nothing else can interleave mid-frame.
//
//   RunWriter — encodes horizontal runs of cells. Each run gets exactly one
//   cursor move; inside a run a color escape is emitted only when the
//   resolved color differs from the previous cell's. A row of forty red
//   cells costs one cursor move, one color escape, and forty bytes.
//
// Color state is deliberately forgotten at each run start. Other windows
// share the terminal and may have changed the active color between two of
// our runs, so the first cell of every run always carries its escape.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::Cell;
use crate::color::{Palette, Sgr};

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// A byte buffer that accumulates ANSI output for a single write.
///
/// Default capacity: 4 KB — a window interior rarely needs more per frame.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 4096;

impl OutputBuffer {
    /// Create an empty buffer with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a character as UTF-8.
    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Append a string's UTF-8 bytes.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Append `n` copies of an ASCII byte.
    pub fn push_repeated(&mut self, byte: u8, n: usize) {
        self.buf.resize(self.buf.len() + n, byte);
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to an arbitrary writer and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut (impl Write + ?Sized)) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OutputBuffer({} bytes)", self.buf.len())
    }
}

// ─── RunWriter ───────────────────────────────────────────────────────────────

/// Encodes runs of adjacent cells with one cursor move per run and
/// run-length color coalescing inside it.
///
/// Counters accumulate across runs until [`reset`](Self::reset), so a
/// render pass can read them back as statistics.
#[derive(Debug, Default)]
pub struct RunWriter {
    last_color: Option<Sgr>,
    runs: usize,
    cells: usize,
    color_changes: usize,
}

impl RunWriter {
    /// Create a writer with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_color: None,
            runs: 0,
            cells: 0,
            color_changes: 0,
        }
    }

    /// Zero the counters and forget the color state.
    #[allow(clippy::missing_const_for_fn)] // *self = Self::new() isn't const-evaluable.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Encode one run starting at absolute screen position `(x, y)`.
    ///
    /// Cells are written left to right from there; the terminal advances
    /// the cursor by itself after each character.
    pub fn write_run(
        &mut self,
        out: &mut OutputBuffer,
        palette: &Palette,
        x: u16,
        y: u16,
        cells: &[Cell],
    ) {
        if cells.is_empty() {
            return;
        }

        ansi::cursor_to(out, x, y).ok();
        self.last_color = None;
        self.runs += 1;

        for cell in cells {
            let sgr = palette.resolve(cell.color);
            if self.last_color != Some(sgr) {
                ansi::color(out, sgr).ok();
                self.last_color = Some(sgr);
                self.color_changes += 1;
            }
            out.push_char(cell.ch);
        }
        self.cells += cells.len();
    }

    /// Runs written since the last reset.
    #[inline]
    #[must_use]
    pub const fn runs(&self) -> usize {
        self.runs
    }

    /// Cells written since the last reset.
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.cells
    }

    /// Color escapes emitted since the last reset.
    #[inline]
    #[must_use]
    pub const fn color_changes(&self) -> usize {
        self.color_changes
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ColorId};

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn output_buffer_new_is_empty() {
        let buf = OutputBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn output_buffer_write_trait() {
        let mut buf = OutputBuffer::new();
        write!(buf, "hello {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn output_buffer_push_char_utf8() {
        let mut buf = OutputBuffer::new();
        buf.push_char('A');
        buf.push_char('█');
        assert_eq!(buf.as_bytes(), "A█".as_bytes());
    }

    #[test]
    fn output_buffer_push_str() {
        let mut buf = OutputBuffer::new();
        buf.push_str("+-ab-+");
        assert_eq!(buf.as_bytes(), b"+-ab-+");
    }

    #[test]
    fn output_buffer_push_repeated() {
        let mut buf = OutputBuffer::new();
        buf.push_repeated(b'-', 4);
        assert_eq!(buf.as_bytes(), b"----");
    }

    #[test]
    fn output_buffer_clear_keeps_capacity() {
        let mut buf = OutputBuffer::new();
        write!(buf, "some data").unwrap();
        let cap = buf.buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.buf.capacity(), cap);
    }

    #[test]
    fn output_buffer_flush_to() {
        let mut buf = OutputBuffer::new();
        write!(buf, "frame data").unwrap();

        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();

        assert_eq!(dest, b"frame data");
        assert!(buf.is_empty()); // cleared after flush
    }

    #[test]
    fn output_buffer_flush_to_empty_is_noop() {
        let mut buf = OutputBuffer::new();
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert!(dest.is_empty());
    }

    // ── RunWriter ───────────────────────────────────────────────────────

    fn encode(runs: &[(u16, u16, &[Cell])], palette: &Palette) -> (String, RunWriter) {
        let mut out = OutputBuffer::new();
        let mut writer = RunWriter::new();
        for &(x, y, cells) in runs {
            writer.write_run(&mut out, palette, x, y, cells);
        }
        (String::from_utf8(out.as_bytes().to_vec()).unwrap(), writer)
    }

    #[test]
    fn same_color_run_emits_one_escape() {
        let cells = [Cell::new('a', Color::RED); 4];
        let (s, w) = encode(&[(2, 1, &cells[..])], &Palette::standard());
        assert_eq!(s, "\x1b[2;3H\x1b[31maaaa");
        assert_eq!(w.runs(), 1);
        assert_eq!(w.cells(), 4);
        assert_eq!(w.color_changes(), 1);
    }

    #[test]
    fn color_changes_only_at_boundaries() {
        let cells = [
            Cell::new('A', Color::RED),
            Cell::new('B', Color::RED),
            Cell::new('C', Color::BLUE),
            Cell::new('D', Color::RED),
        ];
        let (s, w) = encode(&[(0, 0, &cells[..])], &Palette::standard());
        assert_eq!(s, "\x1b[1;1H\x1b[31mAB\x1b[34mC\x1b[31mD");
        assert_eq!(w.color_changes(), 3);
    }

    #[test]
    fn each_run_repositions_and_re_emits_color() {
        let a = [Cell::new('x', Color::GREEN)];
        let b = [Cell::new('y', Color::GREEN)];
        let (s, w) = encode(&[(0, 0, &a[..]), (5, 0, &b[..])], &Palette::standard());
        assert_eq!(s, "\x1b[1;1H\x1b[32mx\x1b[1;6H\x1b[32my");
        assert_eq!(w.runs(), 2);
    }

    #[test]
    fn identifiers_with_equal_escapes_coalesce() {
        let mut palette = Palette::standard();
        palette.set(ColorId::ORANGE, crate::color::Sgr::Code(31));
        let cells = [Cell::new('a', Color::RED), Cell::new('b', Color::ORANGE)];
        let (s, _) = encode(&[(0, 0, &cells[..])], &palette);
        assert_eq!(s, "\x1b[1;1H\x1b[31mab");
    }

    #[test]
    fn empty_run_writes_nothing() {
        let none: &[Cell] = &[];
        let (s, w) = encode(&[(3, 3, none)], &Palette::standard());
        assert!(s.is_empty());
        assert_eq!(w.runs(), 0);
    }

    #[test]
    fn reset_zeroes_counters() {
        let mut out = OutputBuffer::new();
        let mut w = RunWriter::new();
        w.write_run(&mut out, &Palette::standard(), 0, 0, &[Cell::BLANK]);
        w.reset();
        assert_eq!((w.runs(), w.cells(), w.color_changes()), (0, 0, 0));
    }
}
