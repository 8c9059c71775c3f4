// SPDX-License-Identifier: MIT
//
// Screen — the one piece of state every window shares.
//
// Safety: the terminal queries and the panic hook use `unsafe` for ioctl
// (TIOCGWINSZ), isatty, and a raw fd write. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Windows are independent grids, but they all print to the same output
// stream. A `Screen` owns that stream together with the watermark (the
// lowest bottom edge of any window created on it) behind a single mutex:
//
//   Window A ──┐
//   Window B ──┼──▶ Arc<Screen> ──▶ Mutex<State { sink, watermark }>
//   Window C ──┘
//
// Every byte sequence a window produces is assembled in its own
// `OutputBuffer` first, then written in one call while the lock is held.
// Frames from different threads therefore never interleave, and no caller
// code ever runs inside the critical section.
//
// `Screen::stdout()` also installs a panic hook that writes a short restore
// sequence straight to fd 1, so a crash mid-frame never leaves the cursor
// hidden.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, Once, PoisonError};

use crate::ansi;
use crate::color::Palette;
use crate::error::Result;
use crate::options::Options;
use crate::output::OutputBuffer;

// ─── Size ────────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns.
    pub cols: u16,
    /// Number of rows.
    pub rows: u16,
}

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal or the query fails. Windows
/// do not reflow; callers use this once to pick a layout.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Check whether stdout is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic Restore ───────────────────────────────────────────────────────────

/// Neutral foreground, cursor visible.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[37m\x1b[?25h";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install (once per process) a hook that restores the cursor before the
/// original handler prints the panic message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Bypasses `io::stdout()`'s lock: the panic may have happened while a
/// frame was being written.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Screen ──────────────────────────────────────────────────────────────────

struct State {
    sink: Box<dyn Write + Send>,
    /// Lowest bottom edge (`y + height`, 0-indexed, exclusive) of any window.
    watermark: u16,
}

/// The shared output context for a set of windows.
///
/// ```
/// use termviz_term::screen::{CaptureSink, Screen};
///
/// let sink = CaptureSink::new();
/// let screen = Screen::new(sink.clone());
/// screen.clear_screen().unwrap();
/// assert_eq!(sink.contents(), b"\x1b[?25l\x1b[2J\x1b[H");
/// ```
pub struct Screen {
    state: Mutex<State>,
    options: Options,
}

impl Screen {
    /// A screen over an arbitrary sink, with default options.
    pub fn new(sink: impl Write + Send + 'static) -> Arc<Self> {
        Self::with_options(sink, Options::default())
    }

    /// A screen over an arbitrary sink.
    pub fn with_options(sink: impl Write + Send + 'static, options: Options) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                sink: Box::new(sink),
                watermark: 0,
            }),
            options,
        })
    }

    /// A screen on the process's stdout. Installs the panic restore hook.
    #[must_use]
    pub fn stdout(options: Options) -> Arc<Self> {
        install_panic_hook();
        Self::with_options(io::stdout(), options)
    }

    /// Options every window on this screen starts from.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The color table used to resolve every cell.
    #[inline]
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.options.palette
    }

    /// Lowest bottom edge of any window created so far.
    #[must_use]
    pub fn watermark(&self) -> u16 {
        self.lock().watermark
    }

    /// Hide the cursor, clear the terminal, and home the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`](crate::error::Error::Output) if the sink
    /// fails.
    pub fn clear_screen(&self) -> Result<()> {
        let mut out = OutputBuffer::new();
        ansi::cursor_hide(&mut out)?;
        ansi::clear_screen(&mut out)?;
        ansi::cursor_home(&mut out)?;
        self.emit(out.as_bytes(), None)
    }

    /// Show the cursor and park it in column 0 of the first row below every
    /// window. Call once before exiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Output`](crate::error::Error::Output) if the sink
    /// fails.
    pub fn reset_cursor(&self) -> Result<()> {
        let mut state = self.lock();
        let mut out = OutputBuffer::new();
        ansi::cursor_show(&mut out)?;
        ansi::cursor_to(&mut out, 0, state.watermark)?;
        out.flush_to(&mut state.sink)?;
        Ok(())
    }

    /// Write `bytes` in one call under the lock, optionally raising the
    /// watermark in the same critical section.
    pub(crate) fn emit(&self, bytes: &[u8], bottom: Option<u16>) -> Result<()> {
        let mut state = self.lock();
        if let Some(bottom) = bottom {
            state.watermark = state.watermark.max(bottom);
        }
        if !bytes.is_empty() {
            state.sink.write_all(bytes)?;
            state.sink.flush()?;
        }
        Ok(())
    }

    /// A panic in another thread while it held the lock leaves at worst a
    /// half-written frame; the state itself is always consistent.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("watermark", &self.watermark())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ─── CaptureSink ─────────────────────────────────────────────────────────────

/// An in-memory sink whose clones share one buffer.
///
/// Hand one clone to [`Screen::new`] and keep the other to inspect exactly
/// what reached the "terminal".
#[derive(Debug, Clone, Default)]
pub struct CaptureSink(Arc<Mutex<Vec<u8>>>);

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.buf().clone()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf()).into_owned()
    }

    /// Drain the buffer, returning what it held.
    #[must_use]
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buf())
    }

    /// Number of bytes currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf().is_empty()
    }

    fn buf(&self) -> MutexGuard<'_, Vec<u8>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for CaptureSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
