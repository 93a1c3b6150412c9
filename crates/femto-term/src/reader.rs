// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Bounded stdin reads — the live `ByteSource`.
//
// In raw mode the termios settings are VMIN=0, VTIME=1: a `read()` on
// stdin returns within ~100 ms carrying zero or one bytes. That single
// property drives the whole input layer — the decoder's ESC
// disambiguation and its never-hangs guarantee are both just this
// bounded read, surfaced as `Ok(None)` on expiry.
//
// Safety: raw `libc::read` on the stdin descriptor. The standard
// `Read` trait cannot express "timed out with nothing", so we go one
// level down, exactly as we do for termios itself.

use std::io;

use crate::input::ByteSource;

/// Reads single bytes from the stdin descriptor under raw-mode timing.
#[derive(Debug)]
pub struct TtyReader {
    #[cfg(unix)]
    fd: libc::c_int,
}

impl TtyReader {
    /// A reader over the process's stdin.
    #[must_use]
    pub fn stdin() -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::io::AsRawFd;
            Self {
                fd: io::stdin().as_raw_fd(),
            }
        }
        #[cfg(not(unix))]
        {
            Self {}
        }
    }
}

#[cfg(unix)]
impl ByteSource for TtyReader {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte: u8 = 0;
        let n = unsafe { libc::read(self.fd, (&raw mut byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            // VTIME expired with no input available.
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                // Some platforms report the expired timer as EAGAIN
                // instead of a zero-byte read. Same meaning.
                if err.raw_os_error() == Some(libc::EAGAIN) {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}

/// Blocking fallback with no timeout; EOF reads as a quiet terminal.
#[cfg(not(unix))]
impl ByteSource for TtyReader {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
