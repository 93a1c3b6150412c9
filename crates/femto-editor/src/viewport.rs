//! Viewport state — cursor position within the visible screen.
//!
//! All coordinates are **0-indexed** character cells; the ANSI layer
//! converts to the terminal's 1-indexed protocol at the last moment.
//! The invariant `cursor_col < cols && cursor_row < rows` holds after
//! construction and across every move: out-of-range requests clamp
//! silently instead of erroring, so holding an arrow key at a screen
//! edge is a stream of no-ops, not a failure.

use femto_term::input::NavKey;
use femto_term::terminal::Size;

/// Cursor position plus screen dimensions, in character cells.
///
/// Mutated only by [`move_cursor`](Self::move_cursor); the compositor
/// reads it. Plain `Copy` data — the loop owns one and threads it
/// explicitly, no process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Cursor column, `0..cols`.
    pub cursor_col: u16,
    /// Cursor row, `0..rows`.
    pub cursor_row: u16,
    /// Screen width in columns. At least 1.
    pub cols: u16,
    /// Screen height in rows. At least 1.
    pub rows: u16,
}

impl Viewport {
    /// A viewport of the given size with the cursor at the origin.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            cursor_col: 0,
            cursor_row: 0,
            cols: size.cols,
            rows: size.rows,
        }
    }

    /// Apply one navigation key to the cursor, clamped to the screen.
    ///
    /// `PageUp`/`PageDown` repeat the single-step vertical move once per
    /// screen row rather than jumping — the repeated step re-clamps at
    /// the edge, so the result can never leave the viewport. `Delete`
    /// moves nothing; there is no buffer mutation at this stage.
    pub fn move_cursor(&mut self, key: NavKey) {
        match key {
            NavKey::Left => self.cursor_col = self.cursor_col.saturating_sub(1),
            NavKey::Right => {
                if self.cursor_col + 1 < self.cols {
                    self.cursor_col += 1;
                }
            }
            NavKey::Up => self.cursor_row = self.cursor_row.saturating_sub(1),
            NavKey::Down => {
                if self.cursor_row + 1 < self.rows {
                    self.cursor_row += 1;
                }
            }
            NavKey::Home => self.cursor_col = 0,
            NavKey::End => self.cursor_col = self.cols - 1,
            NavKey::PageUp => {
                for _ in 0..self.rows {
                    self.move_cursor(NavKey::Up);
                }
            }
            NavKey::PageDown => {
                for _ in 0..self.rows {
                    self.move_cursor(NavKey::Down);
                }
            }
            NavKey::Delete => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(Size { cols: 80, rows: 24 })
    }

    #[test]
    fn starts_at_origin() {
        let v = viewport();
        assert_eq!((v.cursor_col, v.cursor_row), (0, 0));
    }

    // ── Single steps ────────────────────────────────────────────────────

    #[test]
    fn right_then_left_returns_home() {
        let mut v = viewport();
        v.move_cursor(NavKey::Right);
        assert_eq!(v.cursor_col, 1);
        v.move_cursor(NavKey::Left);
        assert_eq!(v.cursor_col, 0);
    }

    #[test]
    fn down_then_up_returns_to_top() {
        let mut v = viewport();
        v.move_cursor(NavKey::Down);
        assert_eq!(v.cursor_row, 1);
        v.move_cursor(NavKey::Up);
        assert_eq!(v.cursor_row, 0);
    }

    // ── Clamping at the edges ───────────────────────────────────────────

    #[test]
    fn left_at_column_zero_stays_put() {
        let mut v = viewport();
        for _ in 0..3 {
            v.move_cursor(NavKey::Left);
        }
        assert_eq!(v.cursor_col, 0);
    }

    #[test]
    fn right_clamps_at_last_column() {
        let mut v = viewport();
        for _ in 0..200 {
            v.move_cursor(NavKey::Right);
        }
        assert_eq!(v.cursor_col, 79);
        v.move_cursor(NavKey::Right);
        assert_eq!(v.cursor_col, 79);
    }

    #[test]
    fn up_at_top_row_stays_put() {
        let mut v = viewport();
        v.move_cursor(NavKey::Up);
        assert_eq!(v.cursor_row, 0);
    }

    #[test]
    fn down_clamps_at_last_row() {
        let mut v = viewport();
        for _ in 0..100 {
            v.move_cursor(NavKey::Down);
        }
        assert_eq!(v.cursor_row, 23);
    }

    // ── Home / End ──────────────────────────────────────────────────────

    #[test]
    fn home_resets_column() {
        let mut v = viewport();
        v.move_cursor(NavKey::Right);
        v.move_cursor(NavKey::Right);
        v.move_cursor(NavKey::Home);
        assert_eq!(v.cursor_col, 0);
    }

    #[test]
    fn end_jumps_to_last_column() {
        let mut v = viewport();
        v.move_cursor(NavKey::End);
        assert_eq!(v.cursor_col, 79);
    }

    #[test]
    fn end_is_idempotent() {
        let mut v = viewport();
        v.move_cursor(NavKey::End);
        v.move_cursor(NavKey::End);
        assert_eq!(v.cursor_col, 79);
    }

    // ── Paging ──────────────────────────────────────────────────────────

    #[test]
    fn page_down_from_top_lands_on_last_row() {
        let mut v = viewport();
        v.move_cursor(NavKey::PageDown);
        assert_eq!(v.cursor_row, 23);
    }

    #[test]
    fn page_down_is_clamped_not_cumulative() {
        let mut v = viewport();
        v.move_cursor(NavKey::PageDown);
        v.move_cursor(NavKey::PageDown);
        assert_eq!(v.cursor_row, 23);
    }

    #[test]
    fn page_up_returns_to_top() {
        let mut v = viewport();
        v.move_cursor(NavKey::PageDown);
        v.move_cursor(NavKey::PageUp);
        assert_eq!(v.cursor_row, 0);
    }

    #[test]
    fn page_up_from_middle_clamps_at_top() {
        let mut v = viewport();
        v.move_cursor(NavKey::Down);
        v.move_cursor(NavKey::Down);
        v.move_cursor(NavKey::PageUp);
        assert_eq!(v.cursor_row, 0);
    }

    // ── Keys that do not move ───────────────────────────────────────────

    #[test]
    fn delete_moves_nothing() {
        let mut v = viewport();
        v.move_cursor(NavKey::Right);
        v.move_cursor(NavKey::Down);
        let before = v;
        v.move_cursor(NavKey::Delete);
        assert_eq!(v, before);
    }

    // ── Degenerate screens ──────────────────────────────────────────────

    #[test]
    fn one_cell_screen_never_moves() {
        let mut v = Viewport::new(Size { cols: 1, rows: 1 });
        for key in [
            NavKey::Up,
            NavKey::Down,
            NavKey::Left,
            NavKey::Right,
            NavKey::Home,
            NavKey::End,
            NavKey::PageUp,
            NavKey::PageDown,
        ] {
            v.move_cursor(key);
            assert_eq!((v.cursor_col, v.cursor_row), (0, 0), "key {key:?}");
        }
    }
}
