//! # femto-editor — Editor core for femto
//!
//! The data side of the editor, kept free of terminal I/O so every piece
//! is testable against plain bytes:
//!
//! - **[`row`]** — `Row`, one immutable line of display text
//! - **[`viewport`]** — `Viewport`, cursor position and screen dimensions
//!   with clamped movement
//! - **[`view`]** — the frame compositor: viewport + rows in, one
//!   complete screen update out
//!
//! The binary crate owns the loop that connects these to femto-term's
//! raw-mode terminal.

pub mod row;
pub mod view;
pub mod viewport;
