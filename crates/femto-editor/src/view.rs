//! Frame composition — viewport state to one coherent screen update.
//!
//! Each refresh builds the complete frame into a single
//! [`OutputBuffer`]: cursor hidden, cursor homed, every screen row drawn
//! (content, welcome banner, or a `~` past-end marker), cursor
//! repositioned and shown again. The caller writes the buffer to the
//! terminal in one call — accumulating first is what prevents the
//! half-drawn flicker that interleaved writes produce.
//!
//! Row policy, top to bottom:
//!
//! - A row with content: the content, truncated to the screen width.
//!   Never wrapped — wrapping is a lie about where the cursor is.
//! - No content at all: one centered welcome banner a third of the way
//!   down, `~` everywhere else.
//! - Every row ends with clear-to-end-of-line, and `\r\n` separates
//!   rows — after every row except the last, which would otherwise
//!   scroll the screen.

use std::io::{self, Write};

use femto_term::ansi;
use femto_term::output::OutputBuffer;

use crate::row::Row;
use crate::viewport::Viewport;

/// The banner shown a third of the way down an empty buffer.
pub const WELCOME: &str = concat!("femto editor -- version ", env!("CARGO_PKG_VERSION"));

/// Compose one complete frame for the given viewport and rows.
///
/// The returned buffer is ready for a single write to the terminal; it
/// is built fresh per refresh and never reused across frames.
///
/// # Errors
///
/// Infallible in practice — the buffer's writer never fails — but the
/// ANSI emitters are `io::Result` and the error path is propagated
/// rather than unwrapped.
pub fn render(viewport: &Viewport, rows: &[Row]) -> io::Result<OutputBuffer> {
    let mut frame = OutputBuffer::new();

    ansi::cursor_hide(&mut frame)?;
    ansi::cursor_origin(&mut frame)?;

    draw_rows(&mut frame, viewport, rows)?;

    ansi::cursor_to(&mut frame, viewport.cursor_col, viewport.cursor_row)?;
    ansi::cursor_show(&mut frame)?;

    Ok(frame)
}

/// Draw every screen row, each ending in clear-to-end-of-line.
fn draw_rows(frame: &mut OutputBuffer, viewport: &Viewport, rows: &[Row]) -> io::Result<()> {
    for y in 0..viewport.rows {
        if let Some(row) = rows.get(y as usize) {
            let visible = row.len().min(viewport.cols as usize);
            frame.write_all(&row.bytes()[..visible])?;
        } else if rows.is_empty() && y == viewport.rows / 3 {
            draw_banner(frame, viewport.cols)?;
        } else {
            frame.write_all(b"~")?;
        }

        ansi::clear_line(frame)?;
        if y + 1 < viewport.rows {
            frame.write_all(b"\r\n")?;
        }
    }
    Ok(())
}

/// Center the welcome banner, leading the padding with a `~` so the
/// banner row still reads as part of the empty-buffer column.
fn draw_banner(frame: &mut OutputBuffer, cols: u16) -> io::Result<()> {
    let banner = WELCOME.as_bytes();
    let visible = banner.len().min(cols as usize);

    let mut padding = (cols as usize - visible) / 2;
    if padding > 0 {
        frame.write_all(b"~")?;
        padding -= 1;
    }
    for _ in 0..padding {
        frame.write_all(b" ")?;
    }

    frame.write_all(&banner[..visible])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
