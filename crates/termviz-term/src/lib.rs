// SPDX-License-Identifier: MIT
//
// termviz-term — cell-grid rendering engine for termviz.
//
// Each window on the terminal owns a grid of (character, color) cells and a
// parallel set of dirty bits. Drawing only ever touches the grid; a render
// pass walks the dirty bits and turns each maximal dirty run into a single
// cursor move followed by characters, with a color escape only where the
// resolved color changes. A frame with nothing new costs zero bytes.
//
// Every window prints through one shared `Screen`, which serializes output
// from any number of threads and remembers where the lowest window ends so
// the cursor can be parked below everything on exit.
//
// Like the rest of termviz this crate talks to the terminal with plain ANSI
// escape sequences. No TUI framework sits underneath.

pub mod ansi;
pub mod cell;
pub mod color;
pub mod diff;
pub mod error;
pub mod grid;
pub mod mode;
pub mod options;
pub mod output;
pub mod screen;
pub mod window;

pub use error::{Error, Result};
