//! Hard-wrapped text blocks.
//!
//! Text is cut into chunks of exactly the interior width, character by
//! character (no word breaking), one chunk per row from the top. Anything
//! past the last row is dropped.

use termviz_term::color::Color;
use termviz_term::window::Window;
use termviz_term::Result;

/// Clear the interior and write `text` wrapped to the interior width.
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`Error::Output`](termviz_term::Error::Output) if a naive-mode
/// write fails.
pub fn wrap_text(win: &mut Window, text: &str, color: Color) -> Result<usize> {
    win.clear_interior()?;

    let chars: Vec<char> = text.chars().collect();
    let mut rows = 0;
    for (row, chunk) in chars.chunks(win.cols()).take(win.rows()).enumerate() {
        let line: String = chunk.iter().collect();
        win.print(row, 0, &line, color)?;
        rows += 1;
    }
    Ok(rows)
}
