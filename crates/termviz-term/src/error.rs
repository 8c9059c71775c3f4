// SPDX-License-Identifier: MIT
//
// Error type shared by the engine and the drawing primitives.
//
// Every condition here is raised synchronously at the call that violates a
// precondition, before any grid mutation happens. None are retried. The only
// variant that does not describe a caller mistake is `Output`, which wraps
// stream-write failures from the terminal sink.

use std::io;

use thiserror::Error;

/// Everything that can go wrong while building windows or drawing into them.
#[derive(Debug, Error)]
pub enum Error {
    /// A color identifier outside the palette.
    #[error("invalid color identifier {0}")]
    InvalidColor(u8),

    /// Window geometry leaves no room for a 1-cell border on each side.
    #[error("degenerate window {width}x{height}: both sides must be at least 3")]
    DegenerateWindow {
        /// Requested outer width.
        width: u16,
        /// Requested outer height.
        height: u16,
    },

    /// A cell write or a shape landed outside the grid.
    #[error("cell ({row}, {col}) out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// A positioned text write started outside the grid.
    #[error("print at ({row}, {col}) out of range for a {rows}x{cols} interior")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested start column.
        col: usize,
        /// Interior row count.
        rows: usize,
        /// Interior column count.
        cols: usize,
    },

    /// Text wider than the space it must fit in.
    #[error("text of {len} columns exceeds the available {max}")]
    TooLong {
        /// Length of the rejected text.
        len: usize,
        /// Columns available.
        max: usize,
    },

    /// Malformed input: empty, zero, or mismatched sizes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing to the terminal sink failed.
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error came from the output stream rather than from a
    /// rejected argument.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}

/// Result alias used across the termviz crates.
pub type Result<T> = std::result::Result<T, Error>;
