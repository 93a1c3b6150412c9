//! A single row of display text.
//!
//! The buffer in this stage of the editor holds at most one row, created
//! once from the initial content and never edited in place. Content is
//! raw bytes: column counting and truncation happen at byte granularity
//! (display-width awareness is deliberately out of scope).

/// One immutable line of text, newline terminators already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    bytes: Vec<u8>,
}

impl Row {
    /// Build a row from one raw line, stripping any trailing `\n` / `\r`.
    ///
    /// Accepts the line exactly as a reader hands it over — with the
    /// terminator still attached, in either `\n` or `\r\n` form — and
    /// stores only the visible content.
    #[must_use]
    pub fn from_line(mut line: Vec<u8>) -> Self {
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Self { bytes: line }
    }

    /// The row's content bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the row holds no content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
