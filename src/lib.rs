//! Scientific calculator: a pure expression engine plus terminal front-ends.
//!
//! The engine lives in [`calc_engine`] and is the whole public surface of
//! the library; the binary in `main.rs` wires it to a ratatui TUI, a
//! termion line mode, or a plain stdin loop depending on features.

pub mod calc_engine;
