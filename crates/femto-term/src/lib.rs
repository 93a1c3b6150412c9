// SPDX-License-Identifier: MIT
//
// femto-term — Terminal control engine for femto.
//
// Direct VT100-class terminal control with no framework in between:
// raw-mode lifecycle with guaranteed restoration, an escape-sequence
// decoder that turns the ambiguous stdin byte stream into typed key
// events, window geometry resolution with a cursor-probe fallback, and
// whole-frame output buffering so each refresh reaches the terminal as
// a single write.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of raw termios and hand-built ANSI sequences.
// Every byte read from or written to the terminal is accounted for.

pub mod ansi;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
