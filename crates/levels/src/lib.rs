//! Levels module - level source and progress store
//!
//! This crate owns the two collaborators that sit outside the core engine:
//!
//! - [`catalog`]: the level source. A JSON level list (grid size plus opaque
//!   texture/icon ids) with an embedded default catalog, validated so the
//!   core never receives a degenerate grid size.
//! - [`progress`]: the progress store. Unlocked level indices, persisted as
//!   a comma-joined line, notified through the core's
//!   [`ProgressStore`](tui_fifteen_core::ProgressStore) interface when a
//!   puzzle is solved.
//!
//! The core depends on neither of these; they feed it a size and consume its
//! solved notification, nothing more.

pub mod catalog;
pub mod progress;

pub use tui_fifteen_types as types;

pub use catalog::{LevelCatalog, LevelData};
pub use progress::{FileProgress, Progress};
