//! Terminal input module (board-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::PuzzleAction`] and tracks the keyboard cursor
//! that turns "activate" into a board slot index. Mouse taps are translated
//! to slot indices by the view's hit-testing; this crate only handles keys.

pub mod handler;
pub mod map;

pub use tui_fifteen_types as types;

pub use handler::CursorTracker;
pub use map::{handle_key_event, should_quit};
