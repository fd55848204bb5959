//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the puzzle view draws into a
//! plain framebuffer and a diffing backend flushes it to the terminal. No
//! widget/layout framework; the renderer keeps precise control over the
//! tile geometry, which hit-testing reuses to translate mouse taps into
//! board slot indices.
//!
//! Goals:
//! - Keep `core` deterministic and testable (the view is pure)
//! - Redraw every frame from the snapshot, diff only at the terminal
//! - Own the screen-position -> board-slot mapping in one place

pub mod fb;
pub mod puzzle_view;
pub mod renderer;

pub use tui_fifteen_core as core;
pub use tui_fifteen_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use puzzle_view::{HudView, PuzzleView, Viewport};
pub use renderer::TerminalRenderer;
