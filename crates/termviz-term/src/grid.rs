// SPDX-License-Identifier: MIT
//
// Grid — the 2D cell array a window's interior paints to, with dirty bits.
//
// Every interior position of a window is a cell in this grid. Writes mark
// the cell dirty; the diff renderer walks the dirty bits, emits only those
// cells, and clears the bits it emitted.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing for cache efficiency.
//     A row's cells are contiguous in memory, so left-to-right iteration
//     (which the renderer does) is a linear scan.
//
//   - A parallel flat `Vec<bool>` of dirty flags with the same shape. Both
//     vectors are only ever resized together.
//
//   - Every write marks dirty unconditionally, even when the new cell equals
//     the old one. A redundant repaint costs a few bytes; a missed one leaves
//     stale content on screen after another window drew over it.
//
//   - Single cell writes reject out-of-range positions. String and span
//     writes reject an out-of-range start but silently truncate whatever
//     runs past the right edge.

use crate::cell::Cell;
use crate::color::Color;
use crate::error::{Error, Result};

/// A fixed-size grid of cells plus one dirty flag per cell.
///
/// # Examples
///
/// ```
/// use termviz_term::grid::Grid;
/// use termviz_term::color::Color;
///
/// let mut grid = Grid::new(3, 10);
/// assert_eq!(grid.dirty_count(), 0);
///
/// grid.put_str(1, 2, "hi", Color::RED).unwrap();
/// assert_eq!(grid.get(1, 3).unwrap().ch, 'i');
/// assert_eq!(grid.dirty_count(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    dirty: Vec<bool>,
}

impl Grid {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a grid of blank, clean cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let size = rows * cols;
        Self {
            rows,
            cols,
            cells: vec![Cell::BLANK; size],
            dirty: vec![false; size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `(row, col)` is inside the grid.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    const fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Get a cell, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// The raw cell slice, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single row as a slice. Returns `None` if `row` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows {
            let start = self.index(row, 0);
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// The characters of one row as a `String` (handy in tests and logs).
    #[must_use]
    pub fn row_text(&self, row: usize) -> Option<String> {
        self.row(row).map(|cells| cells.iter().map(|c| c.ch).collect())
    }

    /// Iterate cells with their `(row, col)` coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    // ─── Dirty Tracking ──────────────────────────────────────────────────

    /// Whether the cell at `(row, col)` changed since it was last rendered.
    /// Out-of-bounds positions are never dirty.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.dirty[self.index(row, col)]
    }

    /// Number of cells waiting to be rendered.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|&&d| d).count()
    }

    /// Whether any cell is waiting to be rendered.
    #[must_use]
    pub fn has_dirty(&self) -> bool {
        self.dirty.contains(&true)
    }

    /// Flag every cell for repaint without touching content.
    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    /// Drop every pending repaint without emitting anything.
    pub fn clear_dirty(&mut self) {
        self.dirty.fill(false);
    }

    /// Clear the dirty bits of `len` cells starting at `(row, col)`.
    pub(crate) fn clean_span(&mut self, row: usize, col: usize, len: usize) {
        let start = self.index(row, col);
        self.dirty[start..start + len].fill(false);
    }

    /// One row's cells and dirty flags, borrowed together for the renderer.
    pub(crate) fn row_parts_mut(&mut self, row: usize) -> (&[Cell], &mut [bool]) {
        let start = self.index(row, 0);
        let end = start + self.cols;
        (&self.cells[start..end], &mut self.dirty[start..end])
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Write one cell and mark it dirty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(row, col)` is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, ch: char, color: Color) -> Result<()> {
        self.set_cell(row, col, Cell::new(ch, color))
    }

    /// [`set`](Self::set) taking a prebuilt [`Cell`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(row, col)` is outside the grid.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        self.dirty[idx] = true;
        Ok(())
    }

    /// Write a string left to right starting at `(row, col)`.
    ///
    /// Characters past the right edge are dropped without error. Returns the
    /// number of cells written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the start position is outside the
    /// grid.
    pub fn put_str(&mut self, row: usize, col: usize, text: &str, color: Color) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        let start = self.index(row, col);
        let room = self.cols - col;

        let mut written = 0;
        for (ch, (cell, dirty)) in text.chars().zip(
            self.cells[start..start + room]
                .iter_mut()
                .zip(&mut self.dirty[start..start + room]),
        ) {
            *cell = Cell::new(ch, color);
            *dirty = true;
            written += 1;
        }
        Ok(written)
    }

    /// Write `len` copies of `ch` starting at `(row, col)`, truncated at the
    /// right edge. Returns the number of cells written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the start position is outside the
    /// grid.
    pub fn fill_span(
        &mut self,
        row: usize,
        col: usize,
        len: usize,
        ch: char,
        color: Color,
    ) -> Result<usize> {
        if !self.in_bounds(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        let len = len.min(self.cols - col);
        let start = self.index(row, col);
        self.cells[start..start + len].fill(Cell::new(ch, color));
        self.dirty[start..start + len].fill(true);
        Ok(len)
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    /// Reset every cell to [`Cell::BLANK`] and mark it dirty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.dirty.fill(true);
    }

    /// Resize the grid, discarding content. Cells and dirty flags change
    /// shape together; every cell comes back blank and clean.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let size = rows * cols;
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(size, Cell::BLANK);
        self.dirty.clear();
        self.dirty.resize(size, false);
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid({}x{}, {} dirty)",
            self.rows,
            self.cols,
            self.dirty_count()
        )
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
