// SPDX-License-Identifier: MIT
//
// Render modes — when a window's writes reach the terminal.
//
// A window either defers output until an explicit render pass (buffered) or
// prints every write immediately (naive). Both modes write the same grid
// with the same dirty bits; the only thing that differs is what happens
// right after a span of cells lands. That decision lives behind one trait so
// the grid and the diff renderer stay a single implementation:
//
//   Window write ──▶ Grid (dirty) ──▶ WriteStrategy::on_write
//                                        │
//                       Buffered: nothing, wait for render()
//                       Immediate: encode the span now, flush under lock
//
// Switching modes never replays pending cells. Dirty cells left by buffered
// writes stay dirty while the window is naive and are not shown until the
// window goes back to buffered mode and renders.

use std::fmt;

use crate::cell::Cell;
use crate::color::Palette;
use crate::output::{OutputBuffer, RunWriter};

// ─── RenderMode ──────────────────────────────────────────────────────────────

/// How a window's writes reach the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum RenderMode {
    /// Writes accumulate in the grid; output happens on `render()`.
    #[default]
    Buffered,
    /// Every write prints immediately; `render()` does nothing.
    Naive,
}

impl RenderMode {
    /// Parse `buffered` / `naive` (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("buffered") {
            Some(Self::Buffered)
        } else if s.eq_ignore_ascii_case("naive") {
            Some(Self::Naive)
        } else {
            None
        }
    }

    /// The strategy implementing this mode.
    #[must_use]
    pub fn strategy(self) -> &'static dyn WriteStrategy {
        match self {
            Self::Buffered => &Buffered,
            Self::Naive => &Immediate,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buffered => "buffered",
            Self::Naive => "naive",
        })
    }
}

// ─── Span ────────────────────────────────────────────────────────────────────

/// A horizontal run of cells that just landed in a grid, located in
/// absolute screen coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    /// Screen column of the first cell (0-indexed).
    pub x: u16,
    /// Screen row (0-indexed).
    pub y: u16,
    /// The cells as they now stand in the grid.
    pub cells: &'a [Cell],
}

// ─── WriteStrategy ───────────────────────────────────────────────────────────

/// What a window does right after a span of cells is written.
pub trait WriteStrategy: Sync {
    /// The mode this strategy implements.
    fn mode(&self) -> RenderMode;

    /// React to a write. Returns `true` if bytes were appended to `out` and
    /// the span is now on screen (its dirty bits can be cleared).
    fn on_write(&self, span: Span<'_>, palette: &Palette, out: &mut OutputBuffer) -> bool;

    /// Whether `render()` should run the diff pass for this mode.
    fn renders_on_demand(&self) -> bool;
}

/// Defer everything to the next render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Buffered;

impl WriteStrategy for Buffered {
    fn mode(&self) -> RenderMode {
        RenderMode::Buffered
    }

    fn on_write(&self, _span: Span<'_>, _palette: &Palette, _out: &mut OutputBuffer) -> bool {
        false
    }

    fn renders_on_demand(&self) -> bool {
        true
    }
}

/// Encode each span as soon as it is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl WriteStrategy for Immediate {
    fn mode(&self) -> RenderMode {
        RenderMode::Naive
    }

    fn on_write(&self, span: Span<'_>, palette: &Palette, out: &mut OutputBuffer) -> bool {
        if span.cells.is_empty() {
            return false;
        }
        RunWriter::new().write_run(out, palette, span.x, span.y, span.cells);
        true
    }

    fn renders_on_demand(&self) -> bool {
        false
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn parse_modes() {
        assert_eq!(RenderMode::parse("buffered"), Some(RenderMode::Buffered));
        assert_eq!(RenderMode::parse("NAIVE"), Some(RenderMode::Naive));
        assert_eq!(RenderMode::parse("eager"), None);
    }

    #[test]
    fn default_is_buffered() {
        assert_eq!(RenderMode::default(), RenderMode::Buffered);
    }

    #[test]
    fn strategy_reports_its_mode() {
        for mode in [RenderMode::Buffered, RenderMode::Naive] {
            assert_eq!(mode.strategy().mode(), mode);
        }
    }

    #[test]
    fn buffered_defers() {
        let cells = [Cell::new('a', Color::RED)];
        let mut out = OutputBuffer::new();
        let span = Span { x: 0, y: 0, cells: &cells };
        assert!(!Buffered.on_write(span, &Palette::standard(), &mut out));
        assert!(out.is_empty());
        assert!(Buffered.renders_on_demand());
    }

    #[test]
    fn immediate_encodes_span() {
        let cells = [Cell::new('a', Color::RED), Cell::new('b', Color::GREEN)];
        let mut out = OutputBuffer::new();
        let span = Span { x: 4, y: 2, cells: &cells };
        assert!(Immediate.on_write(span, &Palette::standard(), &mut out));
        assert_eq!(out.as_bytes(), b"\x1b[3;5H\x1b[31ma\x1b[32mb");
        assert!(!Immediate.renders_on_demand());
    }

    #[test]
    fn immediate_ignores_empty_span() {
        let mut out = OutputBuffer::new();
        let span = Span { x: 0, y: 0, cells: &[] };
        assert!(!Immediate.on_write(span, &Palette::standard(), &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn display_names() {
        assert_eq!(RenderMode::Naive.to_string(), "naive");
        assert_eq!(RenderMode::Buffered.to_string(), "buffered");
    }
}
