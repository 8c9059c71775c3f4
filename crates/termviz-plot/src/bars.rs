//! Bar charts along the bottom edge of a window.
//!
//! Bar `i` covers columns `[i·w, (i+1)·w)` and grows upward from the last
//! interior row. Heights taller than the interior saturate at the full
//! height; that is the one place the primitives clip instead of failing.

use termviz_term::color::Color;
use termviz_term::window::Window;
use termviz_term::{Error, Result};

/// How many bars of `bar_width` fit side by side in the interior. Zero for
/// a zero width.
#[must_use]
pub fn max_bars(win: &Window, bar_width: usize) -> usize {
    win.cols().checked_div(bar_width).unwrap_or(0)
}

/// Clear the interior and draw one bar per entry of `heights`.
///
/// `colors` is either empty (every bar uses [`Color::RESET`]) or holds
/// exactly one color per bar.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `heights` is empty, `bar_width` is 0, or
///   `colors` is neither empty nor as long as `heights`.
/// - [`Error::OutOfBounds`] if the bars together are wider than the
///   interior.
/// - [`Error::Output`] if a naive-mode write fails.
///
/// Validation happens before the interior is cleared.
pub fn draw_bars(
    win: &mut Window,
    heights: &[usize],
    bar_width: usize,
    colors: &[Color],
    fill: char,
) -> Result<()> {
    if heights.is_empty() {
        return Err(Error::InvalidArgument("bar heights are empty".into()));
    }
    if bar_width == 0 {
        return Err(Error::InvalidArgument("bar width must be positive".into()));
    }
    if !colors.is_empty() && colors.len() != heights.len() {
        return Err(Error::InvalidArgument(format!(
            "{} colors for {} bars",
            colors.len(),
            heights.len()
        )));
    }

    let rows = win.rows();
    let cols = win.cols();
    let span = heights
        .len()
        .checked_mul(bar_width)
        .filter(|&span| span <= cols)
        .ok_or(Error::OutOfBounds {
            row: rows - 1,
            col: cols,
            rows,
            cols,
        })?;

    win.clear_interior()?;

    for (i, &height) in heights.iter().enumerate() {
        let color = colors.get(i).copied().unwrap_or(Color::RESET);
        let col = i * bar_width;
        for row in rows - height.min(rows)..rows {
            win.fill(row, col, bar_width, fill, color)?;
        }
    }

    tracing::trace!(bars = heights.len(), span, "bars drawn");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use termviz_term::screen::{CaptureSink, Screen};

    fn window(width: u16, height: u16) -> Window {
        Window::new(&Screen::new(CaptureSink::new()), 0, 0, width, height, "").unwrap()
    }

    fn column_height(win: &Window, col: usize) -> usize {
        (0..win.rows())
            .filter(|&row| win.grid().get(row, col).is_some_and(|c| c.ch == '#'))
            .count()
    }

    #[test]
    fn bars_fill_bottom_rows_of_their_columns() {
        // 8-row, 12-column interior.
        let mut win = window(14, 10);
        let heights = [3, 5, 2, 6, 4];
        draw_bars(&mut win, &heights, 2, &[], '#').unwrap();

        for (i, &h) in heights.iter().enumerate() {
            for col in [2 * i, 2 * i + 1] {
                assert_eq!(column_height(&win, col), h, "bar {i}, column {col}");
                for row in 0..8 {
                    let filled = win.grid().get(row, col).unwrap().ch == '#';
                    assert_eq!(filled, row >= 8 - h, "bar {i} at ({row}, {col})");
                }
            }
        }
        assert_eq!(column_height(&win, 10), 0);
        assert_eq!(column_height(&win, 11), 0);
    }

    #[test]
    fn tall_bars_saturate() {
        let mut win = window(6, 5);
        draw_bars(&mut win, &[100, 1], 2, &[], '#').unwrap();
        assert_eq!(column_height(&win, 0), 3);
        assert_eq!(column_height(&win, 2), 1);
    }

    #[test]
    fn zero_height_bar_draws_nothing() {
        let mut win = window(6, 5);
        draw_bars(&mut win, &[0, 2], 1, &[], '#').unwrap();
        assert_eq!(column_height(&win, 0), 0);
        assert_eq!(column_height(&win, 1), 2);
    }

    #[test]
    fn per_bar_colors() {
        let mut win = window(6, 4);
        draw_bars(&mut win, &[1, 1], 2, &[Color::RED, Color::BLUE], '#').unwrap();
        assert_eq!(win.grid().get(1, 1).unwrap().color, Color::RED);
        assert_eq!(win.grid().get(1, 2).unwrap().color, Color::BLUE);
    }

    #[test]
    fn previous_content_is_cleared() {
        let mut win = window(6, 4);
        win.print(0, 0, "junk", Color::RESET).unwrap();
        draw_bars(&mut win, &[1], 1, &[], '#').unwrap();
        assert_eq!(win.grid().row_text(0).unwrap(), "    ");
        assert_eq!(win.grid().row_text(1).unwrap(), "#   ");
    }

    #[test]
    fn invalid_arguments_leave_window_untouched() {
        let mut win = window(8, 4);
        win.print(0, 0, "keep", Color::RESET).unwrap();
        let before = win.grid().clone();

        let cases: [(&[usize], usize, &[Color]); 3] = [
            (&[], 1, &[]),
            (&[1, 2], 0, &[]),
            (&[1, 2], 1, &[Color::RED]),
        ];
        for (heights, width, colors) in cases {
            let err = draw_bars(&mut win, heights, width, colors, '#').unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }

        let err = draw_bars(&mut win, &[1, 1, 1, 1], 2, &[], '#').unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
        assert_eq!(win.grid(), &before);
    }

    #[test]
    fn max_bars_divides_interior_width() {
        let win = window(22, 4);
        assert_eq!(max_bars(&win, 3), 6);
        assert_eq!(max_bars(&win, 20), 1);
        assert_eq!(max_bars(&win, 21), 0);
        assert_eq!(max_bars(&win, 0), 0);
    }

    #[test]
    fn max_bars_always_fit() {
        let mut win = window(23, 4);
        let n = max_bars(&win, 4);
        draw_bars(&mut win, &vec![1; n], 4, &[], '#').unwrap();
    }
}
