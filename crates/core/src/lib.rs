//! Core game logic module - pure, deterministic, and testable
//!
//! Everything that makes the sliding puzzle a puzzle lives here, with
//! **zero dependencies** on UI, timers, or I/O:
//!
//! - **Deterministic**: the shuffle is driven by a seeded RNG, so the same
//!   seed produces the same scramble
//! - **Testable**: the board invariants are checked without any rendering
//! - **Portable**: runs in a terminal, headless in tests, or anywhere else
//!
//! # Module Structure
//!
//! - [`board`]: the N x N tile permutation with move validation, shuffling,
//!   and completion detection
//! - [`session`]: per-level orchestration (delayed shuffle scheduling, taps,
//!   feedback/progress notification)
//! - [`rng`]: seeded LCG used by the shuffle
//! - [`snapshot`]: the render-facing state snapshot
//!
//! # Invariants
//!
//! - `cells` is always a permutation of `0..N²`; moves only ever swap
//!   adjacent entries, so no state is reachable that legal play could not
//!   produce
//! - Exactly one slot holds the empty identity `N² - 1`, and the board
//!   tracks it incrementally
//! - Completion is only ever reported after the initial shuffle has handed
//!   the board over (`started`), never on the freshly-built ordered board
//!
//! # Example
//!
//! ```
//! use tui_fifteen_core::{Board, SimpleRng};
//! use tui_fifteen_types::MoveResult;
//!
//! let mut board = Board::new(4).unwrap();
//! board.shuffle(&mut SimpleRng::new(12345));
//!
//! // Any neighbor of the empty slot can slide into it.
//! let slot = board.movable_slots()[0];
//! assert_eq!(board.try_move(slot), MoveResult::Applied);
//! ```

pub mod board;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tui_fifteen_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use rng::SimpleRng;
pub use session::{FeedbackSink, NullFeedback, NullProgress, ProgressStore, PuzzleSession};
pub use snapshot::PuzzleSnapshot;
