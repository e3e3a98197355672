//! Game state snapshot.
//!
//! `GameState` is what observers and pollers see. Its fields are private;
//! only the engine mutates it, through the crate-internal methods below,
//! so board invariants hold for every snapshot handed out.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{EngineResult, PlayerId};
use crate::rules::{check_outcome, Outcome};

/// Turn controller state, derived from `turn` and `outcome`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Waiting for a human move.
    HumanTurn,
    /// Waiting for the opponent strategy.
    SystemTurn,
    /// Won or drawn; only a reset (or size change) starts a new game.
    Finished,
}

/// One applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Cell index in row-major order.
    pub index: usize,
    /// Who played it.
    pub player: PlayerId,
}

/// Complete state of one game.
///
/// Cloning is cheap apart from the board itself: the move history is a
/// persistent vector shared between snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    size: usize,
    turn: PlayerId,
    board: Board,
    outcome: Option<Outcome>,
    generation: u64,
    history: Vector<MoveRecord>,
}

impl GameState {
    /// Fresh game: empty board, human to move, no outcome.
    pub fn new(size: usize) -> EngineResult<Self> {
        Ok(Self {
            size,
            turn: PlayerId::Human,
            board: Board::new(size)?,
            outcome: None,
            generation: 0,
            history: Vector::new(),
        })
    }

    // === Accessors ===

    /// Board dimension N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whose move is next (or who moved last, once finished).
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// `Some` once the game is won or drawn.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Board generation. Changes whenever the board is rebuilt.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every applied move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Last applied move.
    #[must_use]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Current turn controller state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        match (self.outcome, self.turn) {
            (Some(_), _) => TurnPhase::Finished,
            (None, PlayerId::Human) => TurnPhase::HumanTurn,
            (None, PlayerId::System) => TurnPhase::SystemTurn,
        }
    }

    /// Whether the game has an outcome.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    // === Mutation (engine only) ===

    /// Claim `index` for `player` and record the resulting outcome.
    ///
    /// The new board and its outcome are computed before anything is
    /// stored, so on error the state is untouched.
    pub(crate) fn place(&mut self, index: usize, player: PlayerId) -> EngineResult<Option<Outcome>> {
        let next = self.board.with_move(index, player)?;
        let outcome = check_outcome(&next, self.size, index)?;

        self.board = next;
        self.outcome = outcome;
        self.history.push_back(MoveRecord { index, player });
        Ok(outcome)
    }

    /// Hand the move to the other player.
    pub(crate) fn advance_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    pub(crate) fn set_turn(&mut self, turn: PlayerId) {
        self.turn = turn;
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    /// Empty board of `size`, human to move, next generation.
    pub(crate) fn rebuild(&mut self, size: usize) -> EngineResult<()> {
        let mut fresh = GameState::new(size)?;
        fresh.generation = self.generation.wrapping_add(1);
        *self = fresh;
        Ok(())
    }
}
