//! Board module - the sliding-tile puzzle grid
//!
//! The board is an N x N grid stored as a flat permutation: `cells[i]` is the
//! identity (home slot) of the tile sitting in physical slot `i`, and the
//! identity `N² - 1` marks the empty slot. The empty slot index is tracked
//! incrementally so move validation is O(1).
//!
//! The board never assigns a permutation directly: every state it can reach
//! comes from legal adjacent swaps, which is what keeps shuffled boards
//! solvable.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{InvalidSize, MoveResult, MIN_BOARD_SIZE};

/// The puzzle board: grid size, tile permutation, and empty-slot tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid dimension N; fixed for the board's lifetime.
    size: usize,
    /// Row-major permutation of `0..N²`: slot -> tile identity.
    cells: Vec<usize>,
    /// Physical slot currently holding the empty tile.
    /// Invariant: `cells[empty_index] == N² - 1`.
    empty_index: usize,
    /// Set once, after the initial shuffle finishes. Completion checks are
    /// inert while false, so the freshly-created ordered board never reads
    /// as solved.
    started: bool,
    /// Blocks moves while the board is waiting to shuffle, shuffling, or
    /// already solved.
    locked: bool,
}

impl Board {
    /// Create a board in the ordered (identity) state, locked and not yet
    /// started. Fails for degenerate sizes below [`MIN_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        if size < MIN_BOARD_SIZE {
            return Err(InvalidSize { size });
        }
        let cell_count = size * size;
        Ok(Self {
            size,
            cells: (0..cell_count).collect(),
            empty_index: cell_count - 1,
            started: false,
            locked: true,
        })
    }

    /// Put the board back into its freshly-constructed state (identity
    /// permutation, locked, not started). Used when a level is replayed.
    pub fn reset(&mut self) {
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = i;
        }
        self.empty_index = self.cells.len() - 1;
        self.started = false;
        self.locked = true;
    }

    /// Grid dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total slot count N².
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Slot -> tile identity permutation. This is the sole source of truth
    /// for presentation; renderers redraw from it after every mutation.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Physical slot currently holding the empty tile.
    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    /// The identity of the designated empty tile (`N² - 1`).
    pub fn empty_identity(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Try to slide the tile in `slot` into the empty slot.
    ///
    /// An out-of-range slot, a slot not adjacent to the empty slot, or a
    /// locked board all report `Rejected` and leave the board untouched.
    /// When the slide completes the puzzle (only possible once `started`),
    /// the board locks itself and the result is `Solved` rather than
    /// `Applied`.
    pub fn try_move(&mut self, slot: usize) -> MoveResult {
        if self.locked || !self.apply_move(slot) {
            return MoveResult::Rejected;
        }
        if self.started && self.is_identity() {
            self.locked = true;
            return MoveResult::Solved;
        }
        MoveResult::Applied
    }

    /// Adjacency test + swap, shared between player moves and the shuffle.
    /// Returns false without mutating when the slot cannot slide.
    fn apply_move(&mut self, slot: usize) -> bool {
        if slot >= self.cells.len() || !self.slides_into_empty(slot) {
            return false;
        }
        self.cells.swap(slot, self.empty_index);
        self.empty_index = slot;
        true
    }

    /// The four-direction adjacency test, checked in up/down/left/right
    /// order. The column guards stop horizontal moves from wrapping across
    /// the row seam; at most one direction can match for a given slot.
    fn slides_into_empty(&self, slot: usize) -> bool {
        let size = self.size;
        let empty = self.empty_index;
        // Up
        if slot >= size && slot - size == empty {
            return true;
        }
        // Down
        if slot + size == empty {
            return true;
        }
        // Left
        if slot % size != 0 && slot - 1 == empty {
            return true;
        }
        // Right
        if slot % size != size - 1 && slot + 1 == empty {
            return true;
        }
        false
    }

    /// The slots whose tiles could slide right now (at most the four
    /// neighbors of the empty slot). Empty while the board is locked, to
    /// match what `try_move` would accept.
    pub fn movable_slots(&self) -> ArrayVec<usize, 4> {
        let mut slots = ArrayVec::new();
        if self.locked {
            return slots;
        }
        let size = self.size;
        let empty = self.empty_index;
        if empty + size < self.cells.len() {
            slots.push(empty + size); // slides up
        }
        if empty >= size {
            slots.push(empty - size); // slides down
        }
        if empty % size != size - 1 {
            slots.push(empty + 1); // slides left
        }
        if empty % size != 0 {
            slots.push(empty - 1); // slides right
        }
        slots
    }

    /// Scramble with the default count of N³ random moves.
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        let size = self.size;
        self.shuffle_for(rng, size * size * size);
    }

    /// Scramble by performing `iterations` random *valid* moves from the
    /// current state. Only legal swaps are ever applied, so the result is
    /// always reachable (and therefore solvable).
    ///
    /// Runs to completion even if the walk passes back through the ordered
    /// state; `started` flips to true only once, after the last move.
    pub fn shuffle_for(&mut self, rng: &mut SimpleRng, iterations: usize) {
        self.started = false;
        self.locked = true;
        self.shuffle_impl(rng, iterations, |_, _| {});
        self.started = true;
        self.locked = false;
    }

    /// The shuffle walk. Draws a uniform slot per attempt, redraws when the
    /// draw equals `last` (where the empty slot stood before the previous
    /// accepted move) so a move is never immediately undone, and counts an
    /// iteration only when a draw actually slides.
    fn shuffle_impl(
        &mut self,
        rng: &mut SimpleRng,
        iterations: usize,
        mut on_accept: impl FnMut(usize, usize),
    ) {
        let cell_count = self.cells.len() as u32;
        let mut count = 0;
        let mut last: Option<usize> = None;
        while count < iterations {
            let slot = rng.next_range(cell_count) as usize;
            if Some(slot) == last {
                continue;
            }
            let empty_before = self.empty_index;
            if self.apply_move(slot) {
                // Completion stays inert here: started is still false.
                debug_assert!(!self.is_solved());
                on_accept(empty_before, slot);
                last = Some(empty_before);
                count += 1;
            }
        }
    }

    #[cfg(test)]
    fn shuffle_traced(
        &mut self,
        rng: &mut SimpleRng,
        iterations: usize,
    ) -> Vec<(usize, usize)> {
        let mut trace = Vec::with_capacity(iterations);
        self.started = false;
        self.locked = true;
        self.shuffle_impl(rng, iterations, |empty_before, slot| {
            trace.push((empty_before, slot));
        });
        self.started = true;
        self.locked = false;
        trace
    }

    /// Whether the puzzle is complete. Always false before the first shuffle
    /// finishes, even though the board starts out ordered.
    pub fn is_solved(&self) -> bool {
        self.started && self.is_identity()
    }

    fn is_identity(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, &c)| c == i)
    }

    /// Create a mid-game board from explicit parts, for tests.
    #[cfg(test)]
    pub fn from_parts(size: usize, cells: Vec<usize>, started: bool, locked: bool) -> Self {
        assert_eq!(cells.len(), size * size);
        let empty_index = cells
            .iter()
            .position(|&c| c == size * size - 1)
            .expect("cells must contain the empty identity");
        Self {
            size,
            cells,
            empty_index,
            started,
            locked,
        }
    }
}
