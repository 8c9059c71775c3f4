// SPDX-License-Identifier: MIT
//
// termviz color model — identifiers, truecolor, and palette resolution.
//
// A `Color` is either a named palette identifier or an explicit RGB triple.
// Neither knows its escape sequence; the `Palette` resolves colors to an
// `Sgr` value, and the ANSI encoder turns that into bytes:
//
//   Color ──Palette::resolve──▶ Sgr ──ansi::color──▶ ESC[…m
//
// Identifiers are validated when they are built (`ColorId::new`), so
// resolution is a total lookup and never falls through to a silent default.
// The renderer compares resolved `Sgr` values, which is what makes two
// identifiers that the caller mapped to the same escape coalesce.

use std::fmt;

use crate::error::{Error, Result};

// ─── ColorId ─────────────────────────────────────────────────────────────────

/// A validated palette identifier.
///
/// ```
/// use termviz_term::color::ColorId;
///
/// assert_eq!(ColorId::new(0).unwrap(), ColorId::RED);
/// assert!(ColorId::new(42).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(u8);

impl ColorId {
    pub const RED: Self = Self(0);
    pub const GREEN: Self = Self(1);
    pub const YELLOW: Self = Self(2);
    pub const BLUE: Self = Self(3);
    pub const MAGENTA: Self = Self(4);
    pub const ORANGE: Self = Self(5);
    /// The neutral text color every blank cell carries.
    pub const RESET: Self = Self(6);

    /// Number of identifiers the palette defines.
    pub const COUNT: usize = 7;

    const NAMES: [&'static str; Self::COUNT] =
        ["red", "green", "yellow", "blue", "magenta", "orange", "reset"];

    /// Build an identifier from its palette index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if `index` is not a palette slot.
    pub fn new(index: u8) -> Result<Self> {
        if (index as usize) < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidColor(index))
        }
    }

    /// Look an identifier up by its lowercase name (`"red"`, `"orange"`, …).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            // Position is < COUNT (7), so it fits in u8.
            .map(|i| Self(u8::try_from(i).unwrap_or_default()))
    }

    /// The palette index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The identifier's lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }

    /// All identifiers in palette order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(|i| u8::try_from(i).ok()).map(Self)
    }
}

impl fmt::Debug for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ColorId {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// The color of a cell: a palette identifier or an explicit truecolor triple.
///
/// Derived equality is structural. Whether two colors *render* the same
/// depends on the palette; use [`Palette::same`] for that question.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// A palette entry, resolved through [`Palette`].
    Named(ColorId),
    /// 24-bit color, always emitted as `ESC[38;2;R;G;Bm`.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const RED: Self = Self::Named(ColorId::RED);
    pub const GREEN: Self = Self::Named(ColorId::GREEN);
    pub const YELLOW: Self = Self::Named(ColorId::YELLOW);
    pub const BLUE: Self = Self::Named(ColorId::BLUE);
    pub const MAGENTA: Self = Self::Named(ColorId::MAGENTA);
    pub const ORANGE: Self = Self::Named(ColorId::ORANGE);
    pub const RESET: Self = Self::Named(ColorId::RESET);

    /// Truecolor shorthand.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Parse `#RRGGBB` / `#RGB` (with or without `#`) into a truecolor value.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s).map(|(r, g, b)| Self::Rgb(r, g, b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RESET
    }
}

impl From<ColorId> for Color {
    fn from(id: ColorId) -> Self {
        Self::Named(id)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(id) => write!(f, "{id:?}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

// ─── Sgr ─────────────────────────────────────────────────────────────────────

/// A resolved foreground color, ready for the ANSI encoder.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sgr {
    /// A raw SGR parameter: `ESC[{code}m` (the `30`–`37`, `90`–`97` family).
    Code(u8),
    /// 256-color palette index: `ESC[38;5;{n}m`.
    Ansi256(u8),
    /// 24-bit color: `ESC[38;2;{r};{g};{b}m`.
    Rgb(u8, u8, u8),
}

impl Sgr {
    /// Parse the parameter part of a foreground escape.
    ///
    /// Accepts `31`, `38;5;208`, `38;2;255;128;0`, and `#ff8000`.
    ///
    /// ```
    /// use termviz_term::color::Sgr;
    ///
    /// assert_eq!(Sgr::parse("34"), Some(Sgr::Code(34)));
    /// assert_eq!(Sgr::parse("38;5;208"), Some(Sgr::Ansi256(208)));
    /// assert_eq!(Sgr::parse("#ff8000"), Some(Sgr::Rgb(255, 128, 0)));
    /// assert_eq!(Sgr::parse("38;5"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with('#') {
            return parse_hex(s).map(|(r, g, b)| Self::Rgb(r, g, b));
        }

        let params: Vec<u8> = s
            .split(';')
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .ok()?;

        match params.as_slice() {
            [38, 5, n] => Some(Self::Ansi256(*n)),
            [38, 2, r, g, b] => Some(Self::Rgb(*r, *g, *b)),
            [code] => Some(Self::Code(*code)),
            _ => None,
        }
    }
}

impl fmt::Debug for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "sgr({code})"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl fmt::Display for Sgr {
    /// The escape parameters, exactly as they appear between `ESC[` and `m`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Ansi256(idx) => write!(f, "38;5;{idx}"),
            Self::Rgb(r, g, b) => write!(f, "38;2;{r};{g};{b}"),
        }
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// Maps every [`ColorId`] to the escape it renders as.
///
/// [`Palette::standard`] mirrors the classic 8-color table (plus a 256-color
/// orange). Any entry can be overridden:
///
/// ```
/// use termviz_term::color::{Color, ColorId, Palette, Sgr};
///
/// let mut palette = Palette::standard();
/// assert_eq!(palette.resolve(Color::RED), Sgr::Code(31));
///
/// palette.set(ColorId::RED, Sgr::Rgb(255, 40, 40));
/// assert_eq!(palette.resolve(Color::RED), Sgr::Rgb(255, 40, 40));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Sgr; ColorId::COUNT],
}

impl Palette {
    /// The reference table.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            entries: [
                Sgr::Code(31),       // red
                Sgr::Code(32),       // green
                Sgr::Code(33),       // yellow
                Sgr::Code(34),       // blue
                Sgr::Code(35),       // magenta
                Sgr::Ansi256(208),   // orange
                Sgr::Code(37),       // reset
            ],
        }
    }

    /// Resolve a color to its escape form. Total: identifiers are validated
    /// at construction.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, color: Color) -> Sgr {
        match color {
            Color::Named(id) => self.entries[id.index()],
            Color::Rgb(r, g, b) => Sgr::Rgb(r, g, b),
        }
    }

    /// Override the escape an identifier resolves to.
    pub fn set(&mut self, id: ColorId, sgr: Sgr) {
        self.entries[id.index()] = sgr;
    }

    /// Whether two colors render identically under this palette.
    #[inline]
    #[must_use]
    pub fn same(&self, a: Color, b: Color) -> bool {
        self.resolve(a) == self.resolve(b)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(ColorId::all().map(|id| (id, self.entries[id.index()])))
            .finish()
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some((r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => Some((
            parse_hex_byte(&bytes[0..2])?,
            parse_hex_byte(&bytes[2..4])?,
            parse_hex_byte(&bytes[4..6])?,
        )),
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
