// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the `RunWriter`'s job. This module
// just knows the byte-level encoding of the handful of commands a window
// needs: absolute cursor positioning, cursor visibility, screen clear, and
// foreground color selection.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI standard uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to `OutputBuffer` (backed by a Vec).
use std::io::{self, Write};

use crate::color::Sgr;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed and row-first.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Move the cursor to the top-left corner (CUP with no parameters).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2). Does not move the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// Select a foreground color.
///
/// Raw codes are written verbatim (`ESC[31m`), palette indices use the
/// 256-color form, and RGB uses 24-bit `TrueColor`.
pub fn color(w: &mut impl Write, sgr: Sgr) -> io::Result<()> {
    match sgr {
        Sgr::Code(code) => write!(w, "\x1b[{code}m"),
        Sgr::Ansi256(idx) => write!(w, "\x1b[38;5;{idx}m"),
        Sgr::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an ANSI function and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_is_row_first_and_one_based() {
        // x = column 10, y = row 4 → ESC[5;11H
        assert_eq!(emit(|w| cursor_to(w, 10, 4)), "\x1b[5;11H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        assert_eq!(
            emit(|w| cursor_to(w, u16::MAX, u16::MAX)),
            "\x1b[65536;65536H"
        );
    }

    #[test]
    fn cursor_home_sequence() {
        assert_eq!(emit(|w| cursor_home(w)), "\x1b[H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Screen ──────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_sequence() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J");
    }

    // ── Color ───────────────────────────────────────────────────────────

    #[test]
    fn color_raw_code() {
        assert_eq!(emit(|w| color(w, Sgr::Code(31))), "\x1b[31m");
        assert_eq!(emit(|w| color(w, Sgr::Code(97))), "\x1b[97m");
    }

    #[test]
    fn color_256() {
        assert_eq!(emit(|w| color(w, Sgr::Ansi256(208))), "\x1b[38;5;208m");
    }

    #[test]
    fn color_truecolor() {
        assert_eq!(
            emit(|w| color(w, Sgr::Rgb(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
    }

    // ── Composition ─────────────────────────────────────────────────────

    #[test]
    fn multiple_sequences_compose() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 5, 3).unwrap();
        color(&mut buf, Sgr::Rgb(255, 0, 0)).unwrap();
        buf.push(b'A');
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "\x1b[4;6H\x1b[38;2;255;0;0mA");
    }
}
