// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, window geometry, and RAII restore.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd writes. These are
// the standard POSIX interfaces for terminal control — there is no safe
// alternative. Each unsafe block is minimal and documented.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. Acquiring [`RawMode`] snapshots
// the device attributes and applies the raw set; dropping the guard restores
// the snapshot — on the normal path, on the fatal path, on every path. A
// panic hook covers the one path Drop cannot: an unwind that dies before
// the guard's scope closes would otherwise leave the user's shell with no
// echo and no line editing.
//
// The panic hook writes a pre-built restore sequence directly to fd 1,
// bypassing Rust's stdout lock entirely. This prevents deadlock if the
// panic happened while holding the lock (common during a frame flush).
// One raw write, termios restored from the global backup, then the
// original panic handler prints its message to a working terminal.
//
// Why not crossterm? A program whose whole job is terminal control should
// control the terminal, not drive an abstraction layer that might make
// different choices than we would.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;
use crate::input::ByteSource;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal, the query fails, or the
/// reported geometry is degenerate (zero rows or columns).
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

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

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Window geometry ────────────────────────────────────────────────────────

/// Resolve the terminal's size, falling back to a cursor-position probe.
///
/// The primary path is the `TIOCGWINSZ` ioctl. When it fails (or reports
/// zero columns — some terminals do), the fallback parks the cursor in
/// the bottom-right corner and asks the terminal where it ended up via a
/// DSR position report. The probe requires raw mode to be active: the
/// report arrives on stdin and must be read unechoed and unbuffered.
///
/// # Errors
///
/// Returns an error when both paths fail — the probe write is short, the
/// report never arrives, or it parses to a degenerate geometry. Callers
/// treat this as fatal: without known geometry no valid frame exists.
pub fn window_size(src: &mut impl ByteSource) -> io::Result<Size> {
    if let Some(size) = get_size() {
        return Ok(size);
    }
    probe_size(src)
}

/// The fallback path: cursor to the far corner, then ask for its position.
fn probe_size(src: &mut impl ByteSource) -> io::Result<Size> {
    {
        let mut stdout = io::stdout().lock();
        ansi::cursor_far_corner(&mut stdout)?;
        ansi::cursor_position_request(&mut stdout)?;
        stdout.flush()?;
    }

    // Collect the report up to its `R` terminator. The response is tiny
    // (`ESC [ rows ; cols R`); 32 bytes is plenty of slack.
    let mut report = Vec::with_capacity(32);
    while report.len() < 32 {
        match src.read_byte()? {
            Some(b'R') => {
                report.push(b'R');
                break;
            }
            Some(b) => report.push(b),
            // Bounded wait expired — the terminal is not answering.
            None => break,
        }
    }

    parse_cursor_report(&report).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal did not answer the cursor position request",
        )
    })
}

/// Parse a DSR cursor position report: `ESC [ <rows> ; <cols> R`.
///
/// Returns `None` for anything malformed or for degenerate geometry.
fn parse_cursor_report(report: &[u8]) -> Option<Size> {
    let body = report
        .strip_prefix(b"\x1b[")?
        .strip_suffix(b"R")?;

    let mut halves = body.splitn(2, |&b| b == b';');
    let rows = parse_u16(halves.next()?)?;
    let cols = parse_u16(halves.next()?)?;

    if rows == 0 || cols == 0 {
        return None;
    }
    Some(Size { rows, cols })
}

/// Parse a non-empty all-digit slice as u16.
fn parse_u16(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut value: u16 = 0;
    for &d in digits {
        value = value
            .checked_mul(10)?
            .checked_add(u16::from(d - b'0'))?;
    }
    Some(value)
}

// ─── Panic-safe restore ─────────────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`RawMode`] guard owns its own copy, but the panic hook can't
/// access it. This backup — behind a [`Mutex`], not `static mut` —
/// lets the hook restore the terminal without the guard.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Screen restore sequence for emergency use: clear, cursor home, cursor
/// visible. Leaves the panic message a blank first line to land on.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[2J\x1b[H\x1b[?25h";

/// Panic hook guard — the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, no way to read the error message. The hook
/// writes [`EMERGENCY_RESTORE`] directly to fd 1 (bypassing Rust's stdout
/// lock to avoid deadlock), restores termios from the backup, then
/// delegates to the original panic handler.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the screen restore sequence directly to stdout's file descriptor.
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

// ─── Raw mode ───────────────────────────────────────────────────────────────

/// Derive the raw attribute set from a snapshot of the original.
///
/// Input side: no break-to-SIGINT, no CR→NL translation, no parity
/// checking, no eighth-bit stripping, no flow control. Output side: no
/// post-processing (so `\n` stays a bare line feed and we emit `\r\n`
/// ourselves). Local side: no echo, no canonical line buffering, no
/// signal keys, no literal-next. Character size forced to 8 bits.
///
/// VMIN=0 / VTIME=1: `read()` returns after at most ~100 ms with
/// whatever is available, including nothing — the bounded wait the input
/// layer is built on.
#[cfg(unix)]
#[must_use]
pub fn raw_attributes(original: libc::termios) -> libc::termios {
    let mut raw = original;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = 1;
    raw
}

/// Exclusive raw-mode ownership of the terminal, restored on drop.
///
/// [`enter`](Self::enter) snapshots the device attributes and applies the
/// raw set. The snapshot is reapplied exactly once when the guard drops —
/// which happens on every exit path, normal or fatal, because the guard
/// lives at the top of the program's scope. A panic hook additionally
/// covers unwinds (see module docs).
///
/// There is deliberately no `restore()` method: re-applying stale
/// attributes twice is undefined behavior as far as this program is
/// concerned, and the type system preventing it is better than a comment
/// asking nicely.
#[derive(Debug)]
pub struct RawMode {
    #[cfg(unix)]
    original: libc::termios,
}

impl RawMode {
    /// Enter raw mode on stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal's attributes cannot be read or
    /// written. Callers treat this as fatal — a terminal that cannot
    /// report or accept attributes cannot host this program.
    #[cfg(unix)]
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        unsafe {
            let mut original: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &raw mut original) != 0 {
                return Err(io::Error::last_os_error());
            }

            // Save to the global backup for the panic hook.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(original);
            }

            let attrs = raw_attributes(original);
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const attrs) != 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(Self { original })
        }
    }

    /// No-op acquisition on platforms without termios.
    #[cfg(not(unix))]
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const self.original);
        }

        // Restored — the panic hook no longer needs the backup.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
