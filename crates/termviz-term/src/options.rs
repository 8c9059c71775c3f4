// SPDX-License-Identifier: MIT
//
// Screen options — the directive layer.
//
// A screen is configured from a short, whitespace-separated directive string
// (an environment variable, a flag, a config line). Parsing happens in two
// steps: each word becomes a typed `Directive`, then the directives are
// applied in order to an `Options` value. Later directives win.
//
// | Syntax              | Effect                                       |
// |---------------------|----------------------------------------------|
// | `mode=buffered`     | new windows render on demand (default)       |
// | `mode=naive`        | new windows print every write immediately    |
// | `strict`            | `print_line` rejects overlong text           |
// | `nostrict`          | `print_line` truncates overlong text         |
// | `<color>=<escape>`  | palette override: `31`, `38;5;208`, `#rrggbb`|

use std::fmt;
use std::str::FromStr;

use crate::color::{ColorId, Palette, Sgr};
use crate::error::{Error, Result};
use crate::mode::RenderMode;

// ─── Directive ───────────────────────────────────────────────────────────────

/// One parsed configuration word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `mode=buffered` / `mode=naive`.
    Mode(RenderMode),
    /// `strict` / `nostrict`.
    Strict(bool),
    /// `red=38;5;196` and friends.
    Color(ColorId, Sgr),
}

/// Parse a single directive word.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for unknown names and malformed values.
pub fn parse_directive(arg: &str) -> Result<Directive> {
    match arg {
        "strict" => return Ok(Directive::Strict(true)),
        "nostrict" => return Ok(Directive::Strict(false)),
        _ => {}
    }

    let Some((name, value)) = arg.split_once('=') else {
        return Err(Error::invalid(format!("unknown option `{arg}`")));
    };

    if name == "mode" {
        return RenderMode::parse(value)
            .map(Directive::Mode)
            .ok_or_else(|| Error::invalid(format!("unknown render mode `{value}`")));
    }

    let id = ColorId::from_name(name)
        .ok_or_else(|| Error::invalid(format!("unknown option `{name}`")))?;
    let sgr = Sgr::parse(value)
        .ok_or_else(|| Error::invalid(format!("malformed color `{value}` for {name}")))?;
    Ok(Directive::Color(id, sgr))
}

/// Parse a whitespace-separated directive string. Empty input yields an
/// empty list.
///
/// # Errors
///
/// Fails on the first word [`parse_directive`] rejects.
pub fn parse_directives(s: &str) -> Result<Vec<Directive>> {
    s.split_whitespace().map(parse_directive).collect()
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Settings shared by every window on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Mode new windows start in.
    pub mode: RenderMode,
    /// Whether `print_line` rejects text wider than the interior instead of
    /// truncating it.
    pub strict_lines: bool,
    /// Color identifier table.
    pub palette: Palette,
}

impl Options {
    /// Parse a directive string on top of the defaults.
    ///
    /// ```
    /// use termviz_term::color::{Color, Sgr};
    /// use termviz_term::mode::RenderMode;
    /// use termviz_term::options::Options;
    ///
    /// let opts = Options::parse("mode=naive red=#ff0000").unwrap();
    /// assert_eq!(opts.mode, RenderMode::Naive);
    /// assert_eq!(opts.palette.resolve(Color::RED), Sgr::Rgb(255, 0, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for the first bad directive.
    pub fn parse(s: &str) -> Result<Self> {
        let mut opts = Self::default();
        for directive in parse_directives(s)? {
            opts.apply(directive);
        }
        Ok(opts)
    }

    /// Apply one directive.
    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Mode(mode) => self.mode = mode,
            Directive::Strict(on) => self.strict_lines = on,
            Directive::Color(id, sgr) => self.palette.set(id, sgr),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: RenderMode::Buffered,
            strict_lines: false,
            palette: Palette::standard(),
        }
    }
}

impl FromStr for Options {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Options {
    /// Only the settings that differ from the defaults, in directive syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Palette::standard();
        let mut words = Vec::new();

        if self.mode != RenderMode::Buffered {
            words.push(format!("mode={}", self.mode));
        }
        if self.strict_lines {
            words.push("strict".to_string());
        }
        for id in ColorId::all() {
            let sgr = self.palette.resolve(id.into());
            if sgr != defaults.resolve(id.into()) {
                words.push(format!("{}={sgr}", id.name()));
            }
        }
        f.write_str(&words.join(" "))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
