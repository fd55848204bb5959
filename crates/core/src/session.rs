//! Session module - per-level orchestration around the board
//!
//! A [`PuzzleSession`] owns the board for one level: it arms the delayed
//! shuffle, feeds elapsed time into it, routes taps to the board, and
//! notifies the injected feedback and progress sinks at each transition.
//! There is no ambient singleton anywhere: whoever runs the level owns the
//! session, and capabilities come in through the trait objects passed to
//! [`PuzzleSession::tap`].
//!
//! The session never sleeps. The host loop calls [`PuzzleSession::tick`]
//! with elapsed milliseconds and the pending shuffle fires when its
//! countdown expires; cancelling before that is always possible.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::snapshot::PuzzleSnapshot;
use crate::types::{InvalidSize, MoveResult, SHUFFLE_DELAY_MS};

/// Receiver for the discrete board notifications (the haptics/audio
/// boundary). All three fire synchronously at the state transition.
pub trait FeedbackSink {
    fn on_move_applied(&mut self);
    fn on_move_rejected(&mut self);
    fn on_solved(&mut self);
}

/// A feedback sink that ignores everything. Handy for tests and headless
/// drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn on_move_applied(&mut self) {}
    fn on_move_rejected(&mut self) {}
    fn on_solved(&mut self) {}
}

/// Receiver for the solved notification that unlocks further content. How
/// (or whether) the unlock is persisted is the store's concern.
pub trait ProgressStore {
    fn unlock_next(&mut self, solved_level: usize);
}

/// A progress store that unlocks nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressStore for NullProgress {
    fn unlock_next(&mut self, _solved_level: usize) {}
}

/// One level's worth of game state: the board plus scheduling and counters.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    board: Board,
    rng: SimpleRng,
    level_index: usize,
    texture: String,
    moves: u32,
    /// Countdown until the scheduled shuffle runs; None when nothing is
    /// pending.
    shuffle_timer_ms: Option<u32>,
}

impl PuzzleSession {
    /// Create a session for a level. The board starts ordered and locked;
    /// call [`PuzzleSession::schedule_shuffle`] (or
    /// [`PuzzleSession::shuffle_now`]) to begin play.
    ///
    /// `texture` is the level's opaque texture id; the session carries it
    /// through to snapshots untouched.
    pub fn new(
        level_index: usize,
        size: usize,
        texture: &str,
        seed: u32,
    ) -> Result<Self, InvalidSize> {
        Ok(Self {
            board: Board::new(size)?,
            rng: SimpleRng::new(seed),
            level_index,
            texture: texture.to_string(),
            moves: 0,
            shuffle_timer_ms: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Player moves since the shuffle finished.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Arm the delayed shuffle. The board stays locked (and taps rejected)
    /// until the countdown expires in [`PuzzleSession::tick`].
    pub fn schedule_shuffle(&mut self, delay_ms: u32) {
        self.shuffle_timer_ms = Some(delay_ms);
    }

    /// Disarm a pending shuffle. Returns whether one was pending.
    pub fn cancel_scheduled_shuffle(&mut self) -> bool {
        self.shuffle_timer_ms.take().is_some()
    }

    /// Remaining delay of the pending shuffle, if any.
    pub fn pending_shuffle_ms(&self) -> Option<u32> {
        self.shuffle_timer_ms
    }

    /// Advance session time. Returns true when this tick ran the shuffle.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.shuffle_timer_ms else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining > 0 {
            self.shuffle_timer_ms = Some(remaining);
            return false;
        }
        self.shuffle_now();
        true
    }

    /// Run the shuffle immediately, cancelling any pending countdown. The
    /// shuffle is a single blocking call; afterwards the board is started
    /// and unlocked.
    pub fn shuffle_now(&mut self) {
        self.shuffle_timer_ms = None;
        self.board.shuffle(&mut self.rng);
        self.moves = 0;
    }

    /// Route a tap at `slot` to the board and notify the sinks at the
    /// transition: applied/rejected on every tap, plus the solved
    /// notification (and the progress unlock) when the move completes the
    /// puzzle.
    pub fn tap(
        &mut self,
        slot: usize,
        feedback: &mut dyn FeedbackSink,
        progress: &mut dyn ProgressStore,
    ) -> MoveResult {
        let result = self.board.try_move(slot);
        match result {
            MoveResult::Rejected => feedback.on_move_rejected(),
            MoveResult::Applied => {
                self.moves += 1;
                feedback.on_move_applied();
            }
            MoveResult::Solved => {
                self.moves += 1;
                feedback.on_move_applied();
                feedback.on_solved();
                progress.unlock_next(self.level_index);
            }
        }
        result
    }

    /// Replay the level: ordered board, move counter cleared, shuffle
    /// re-armed with the default preview delay.
    pub fn restart(&mut self) {
        self.board.reset();
        self.moves = 0;
        self.schedule_shuffle(SHUFFLE_DELAY_MS);
    }

    /// Fill `out` for rendering, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut PuzzleSnapshot) {
        out.size = self.board.size();
        out.cells.clear();
        out.cells
            .extend(self.board.cells().iter().map(|&c| c as u16));
        out.empty_index = self.board.empty_index();
        out.started = self.board.started();
        out.locked = self.board.locked();
        out.solved = self.board.is_solved();
        out.moves = self.moves;
        out.pending_shuffle_ms = self.shuffle_timer_ms;
        out.level_index = self.level_index;
        out.texture.clone_from(&self.texture);
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let mut out = PuzzleSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
