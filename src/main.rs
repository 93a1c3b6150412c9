// SPDX-License-Identifier: MIT
//
// femto — a tiny raw-terminal text viewer in the kilo lineage.
//
// This is the binary that wires the crates together:
//
//   femto-term   → raw mode, key decoding, ANSI output, geometry
//   femto-editor → text row, viewport, frame composition
//
// One synchronous loop per process:
//
//   compose frame → single write → bounded read → decode key → dispatch
//
// No threads, no timers, no shared state: the `Editor` struct owns the
// viewport and rows and is threaded explicitly through the loop. The
// terminal is the one shared resource — the `RawMode` guard acquired at
// the top of `run` restores it on every exit path, and the fatal path in
// `main` leaves the screen cleared with a diagnostic on stderr.
//
// Exit status: 0 on Ctrl-Q, non-zero on any terminal-control failure.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process;

use femto_editor::row::Row;
use femto_editor::view;
use femto_editor::viewport::Viewport;
use femto_term::ansi;
use femto_term::input::{self, Key, ctrl};
use femto_term::reader::TtyReader;
use femto_term::terminal::{self, RawMode, Size};

/// Ctrl-Q ends the session.
const QUIT_KEY: u8 = ctrl(b'q');

// ─── Editor ─────────────────────────────────────────────────────────────────

/// What the loop should do after a key has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Keep running.
    Continue,
    /// Orderly shutdown requested.
    Quit,
}

/// The editor state: one viewport, zero or one rows of text.
struct Editor {
    viewport: Viewport,
    rows: Vec<Row>,
}

impl Editor {
    fn new(size: Size, rows: Vec<Row>) -> Self {
        Self {
            viewport: Viewport::new(size),
            rows,
        }
    }

    /// Compose and write one frame.
    fn refresh(&self) -> io::Result<()> {
        let mut frame = view::render(&self.viewport, &self.rows)?;
        frame.flush_stdout()
    }

    /// Apply one key event to the state.
    fn dispatch(&mut self, key: Key) -> Action {
        match key {
            Key::Char(QUIT_KEY) => Action::Quit,
            Key::Nav(nav) => {
                self.viewport.move_cursor(nav);
                Action::Continue
            }
            // Typed characters edit nothing at this stage, and unknown
            // escape sequences are expected noise from other emulators.
            Key::Char(_) | Key::Unknown => Action::Continue,
        }
    }
}

// ─── Startup ────────────────────────────────────────────────────────────────

/// Load the initial content: the first line of the file, if any.
fn load_initial_row(path: &str) -> io::Result<Vec<Row>> {
    let file = File::open(path)?;
    let mut line = Vec::new();
    let n = BufReader::new(file).read_until(b'\n', &mut line)?;

    if n == 0 {
        // Empty file — same as starting with no file at all.
        Ok(Vec::new())
    } else {
        Ok(vec![Row::from_line(line)])
    }
}

/// Clear the screen and home the cursor, outside any frame.
fn clear_screen() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    ansi::clear_screen(&mut stdout)?;
    ansi::cursor_origin(&mut stdout)?;
    stdout.flush()
}

// ─── Main loop ──────────────────────────────────────────────────────────────

fn run(path: Option<&str>) -> io::Result<()> {
    // Raw mode first: the geometry fallback needs its unechoed,
    // unbuffered reads. The guard restores the terminal when this
    // function returns — through the quit path or through any `?`.
    let _raw = RawMode::enter()?;

    let mut reader = TtyReader::stdin();
    let size = terminal::window_size(&mut reader)?;

    let rows = match path {
        Some(p) => load_initial_row(p)?,
        None => Vec::new(),
    };
    let mut editor = Editor::new(size, rows);

    loop {
        editor.refresh()?;
        let key = input::read_key(&mut reader)?;
        if editor.dispatch(key) == Action::Quit {
            break;
        }
    }

    // Orderly shutdown: leave a blank screen, then the guard restores
    // the original attributes.
    clear_screen()
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if let Err(e) = run(args.get(1).map(String::as_str)) {
        // Fatal path: attributes are already restored (the guard dropped
        // on the way out). Best-effort screen reset, then diagnose.
        let _ = clear_screen();
        eprintln!("femto: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use femto_term::input::NavKey;
    use pretty_assertions::assert_eq;

    use super::*;

    fn editor() -> Editor {
        Editor::new(Size { cols: 80, rows: 24 }, Vec::new())
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    #[test]
    fn ctrl_q_quits() {
        let mut e = editor();
        assert_eq!(e.dispatch(Key::Char(QUIT_KEY)), Action::Quit);
    }

    #[test]
    fn plain_q_does_not_quit() {
        let mut e = editor();
        assert_eq!(e.dispatch(Key::Char(b'q')), Action::Continue);
    }

    #[test]
    fn navigation_moves_the_cursor() {
        let mut e = editor();
        assert_eq!(e.dispatch(Key::Nav(NavKey::Right)), Action::Continue);
        assert_eq!(e.dispatch(Key::Nav(NavKey::Down)), Action::Continue);
        assert_eq!(e.viewport.cursor_col, 1);
        assert_eq!(e.viewport.cursor_row, 1);
    }

    #[test]
    fn typed_characters_are_ignored() {
        let mut e = editor();
        e.dispatch(Key::Char(b'x'));
        assert_eq!((e.viewport.cursor_col, e.viewport.cursor_row), (0, 0));
    }

    #[test]
    fn unknown_sequences_are_a_no_op() {
        let mut e = editor();
        assert_eq!(e.dispatch(Key::Unknown), Action::Continue);
        assert_eq!((e.viewport.cursor_col, e.viewport.cursor_row), (0, 0));
    }

    #[test]
    fn delete_is_dispatched_but_moves_nothing() {
        let mut e = editor();
        assert_eq!(e.dispatch(Key::Nav(NavKey::Delete)), Action::Continue);
        assert_eq!((e.viewport.cursor_col, e.viewport.cursor_row), (0, 0));
    }

    // ── Initial content ────────────────────────────────────────────────

    #[test]
    fn load_reads_only_the_first_line() {
        let path = std::env::temp_dir().join("femto-load-first-line");
        std::fs::write(&path, b"first line\nsecond line\n").unwrap();

        let rows = load_initial_row(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bytes(), b"first line");
    }

    #[test]
    fn load_of_empty_file_yields_no_rows() {
        let path = std::env::temp_dir().join("femto-load-empty");
        std::fs::write(&path, b"").unwrap();

        let rows = load_initial_row(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn load_of_missing_file_is_an_error() {
        assert!(load_initial_row("/nonexistent/femto-no-such-file").is_err());
    }

    #[test]
    fn load_keeps_a_line_without_terminator() {
        let path = std::env::temp_dir().join("femto-load-no-newline");
        std::fs::write(&path, b"lonely").unwrap();

        let rows = load_initial_row(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rows[0].bytes(), b"lonely");
    }
}
