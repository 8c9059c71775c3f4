// SPDX-License-Identifier: MIT
//
// Cell — the atomic unit of window content.
//
// Every interior position of a window is one Cell: a single-width character
// and the color it is drawn in. The grid, the diff renderer, and the naive
// write path all exist to store, compare, and emit these.
//
// Characters are assumed to occupy exactly one terminal column. There is no
// wide-character or continuation handling; callers that pass CJK or emoji
// get whatever their terminal makes of it.

use std::fmt;

use crate::color::Color;

/// One character position inside a window.
///
/// ```
/// use termviz_term::cell::Cell;
/// use termviz_term::color::Color;
///
/// let cell = Cell::new('#', Color::GREEN);
/// assert_eq!(cell.ch, '#');
/// assert!(Cell::default().is_blank());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character to display.
    pub ch: char,
    /// The foreground color it is drawn in.
    pub color: Color,
}

impl Cell {
    /// A space in the neutral color.
    pub const BLANK: Self = Self {
        ch: ' ',
        color: Color::RESET,
    };

    #[inline]
    #[must_use]
    pub const fn new(ch: char, color: Color) -> Self {
        Self { ch, color }
    }

    /// Whether this cell is indistinguishable from [`Cell::BLANK`].
    #[inline]
    #[must_use]
    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }

    /// Same character, different color.
    #[inline]
    #[must_use]
    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({:?}", self.ch)?;
        if self.color != Color::RESET {
            write!(f, ", {:?}", self.color)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_space_in_reset() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.color, Color::RESET);
        assert!(cell.is_blank());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Cell::new('A', Color::RED), Cell::new('A', Color::RED));
        assert_ne!(Cell::new('A', Color::RED), Cell::new('B', Color::RED));
        assert_ne!(Cell::new('A', Color::RED), Cell::new('A', Color::BLUE));
    }

    #[test]
    fn colored_space_is_not_blank() {
        assert!(!Cell::new(' ', Color::RED).is_blank());
    }

    #[test]
    fn with_color_keeps_character() {
        let cell = Cell::new('x', Color::RED).with_color(Color::rgb(0, 0, 255));
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.color, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn debug_omits_default_color() {
        assert_eq!(format!("{:?}", Cell::BLANK), "Cell(' ')");
        assert_eq!(format!("{:?}", Cell::new('A', Color::RED)), "Cell('A', red)");
    }
}
