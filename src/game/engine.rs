//! The game engine: turn control over a board and its rules.
//!
//! ## Turn controller
//!
//! ```text
//! HumanTurn  --apply_human_move [no outcome]--> SystemTurn
//! HumanTurn  --apply_human_move [outcome]-----> Finished
//! SystemTurn --auto_move [no outcome]---------> HumanTurn
//! SystemTurn --auto_move [outcome]------------> Finished
//! any        --reset / change_size------------> HumanTurn
//! ```
//!
//! Out-of-turn moves, moves after the game ended, and moves on filled cells
//! are no-ops reported as `MoveResult::Ignored`. Only a bad index is an
//! error. Either way a rejected move changes nothing and publishes nothing.
//!
//! The engine is synchronous. The delayed opponent move lives in
//! `crate::session`, which drives `auto_move_for` from a timer.

use tracing::{debug, info, instrument, warn};

use super::observer::{Observers, StateChange, SubscriptionId, Transition};
use super::persist::SavedGame;
use super::state::{GameState, TurnPhase};
use crate::core::{
    clamp_size, Difficulty, EngineConfig, EngineError, EngineResult, GameRng, PlayerId, MAX_SIZE,
    MIN_SIZE,
};
use crate::opponent::OpponentStrategy;
use crate::rules::Outcome;

/// Why a move was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The submitter is not the player to move.
    NotYourTurn,
    /// The game already has an outcome.
    GameOver,
    /// The cell is already claimed.
    CellFilled,
    /// A scheduled opponent move arrived for an older board.
    Stale,
    /// The strategy found no cell to play.
    NoMoveAvailable,
}

/// Result of a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The move was played.
    Applied {
        index: usize,
        player: PlayerId,
        outcome: Option<Outcome>,
    },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl MoveResult {
    /// Whether the move was played.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied { .. })
    }

    /// The outcome the move produced, if it was applied and ended the game.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            MoveResult::Applied { outcome, .. } => *outcome,
            MoveResult::Ignored(_) => None,
        }
    }
}

/// A human move and the opponent's immediate reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round {
    pub human: MoveResult,
    /// `None` when the human move did not hand the turn to the system.
    pub system: Option<MoveResult>,
}

/// Single-game engine.
///
/// Owns the state, the opponent strategy, and the RNG it draws from. All
/// mutation goes through `&mut self`, so one engine has exactly one writer.
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    strategy: Box<dyn OpponentStrategy>,
    rng: GameRng,
    observers: Observers,
}

impl GameEngine {
    /// Engine with the strategy chosen by `config.difficulty`.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let strategy = config.difficulty.strategy();
        Self::with_strategy(config, strategy)
    }

    /// Engine with an explicit opponent strategy.
    pub fn with_strategy(config: EngineConfig, strategy: Box<dyn OpponentStrategy>) -> EngineResult<Self> {
        let state = GameState::new(config.effective_initial_size())?;
        let rng = GameRng::new(config.seed);
        debug!(size = state.size(), seed = rng.seed(), strategy = strategy.name(), "engine created");
        Ok(Self {
            config,
            state,
            strategy,
            rng,
            observers: Observers::default(),
        })
    }

    // === Accessors ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current state, for polling hosts.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Current turn controller state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Name of the active opponent strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    // === Observers ===

    /// Register an observer for every subsequent state change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&mut self, transition: Transition) {
        if self.observers.is_empty() {
            return;
        }
        let change = StateChange {
            transition,
            state: self.state.clone(),
        };
        self.observers.publish(&change);
    }

    // === Opponent ===

    /// Swap the opponent for the one `difficulty` maps to.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.strategy = difficulty.strategy();
        info!(?difficulty, strategy = self.strategy.name(), "difficulty changed");
    }

    /// Swap in a custom opponent strategy.
    pub fn set_strategy(&mut self, strategy: Box<dyn OpponentStrategy>) {
        self.strategy = strategy;
    }

    // === Moves ===

    /// Play `index` for the human.
    ///
    /// Errors only for an index outside the board. Out-of-turn moves, moves
    /// after the game ended, and filled cells are ignored.
    #[instrument(skip(self), fields(generation = self.state.generation()))]
    pub fn apply_human_move(&mut self, index: usize) -> EngineResult<MoveResult> {
        if let Some(reason) = self.reject_reason(PlayerId::Human) {
            debug!(?reason, "human move ignored");
            return Ok(MoveResult::Ignored(reason));
        }

        let result = self.play(index, PlayerId::Human)?;
        if result.is_applied() {
            self.publish(Transition::HumanMove { index });
        }
        Ok(result)
    }

    /// Let the opponent strategy play, if it is the system's turn.
    #[instrument(skip(self), fields(generation = self.state.generation(), strategy = self.strategy.name()))]
    pub fn auto_move(&mut self) -> EngineResult<MoveResult> {
        if let Some(reason) = self.reject_reason(PlayerId::System) {
            debug!(?reason, "system move ignored");
            return Ok(MoveResult::Ignored(reason));
        }

        let Some(index) = self.strategy.select_move(self.state.board(), &mut self.rng) else {
            warn!("strategy found no move on a board without an outcome");
            return Ok(MoveResult::Ignored(IgnoreReason::NoMoveAvailable));
        };

        let result = self.play(index, PlayerId::System)?;
        match result {
            MoveResult::Applied { .. } => self.publish(Transition::SystemMove { index }),
            MoveResult::Ignored(reason) => warn!(index, ?reason, "strategy picked an unplayable cell"),
        }
        Ok(result)
    }

    /// `auto_move`, but only for the board generation it was scheduled on.
    ///
    /// A delayed opponent move that arrives after a reset, size change, or
    /// restore is discarded as `Ignored(Stale)`.
    pub fn auto_move_for(&mut self, generation: u64) -> EngineResult<MoveResult> {
        if generation != self.state.generation() {
            debug!(
                scheduled = generation,
                current = self.state.generation(),
                "discarding stale opponent move"
            );
            return Ok(MoveResult::Ignored(IgnoreReason::Stale));
        }
        self.auto_move()
    }

    /// Human move followed immediately by the opponent's reply.
    ///
    /// For hosts that want no delay; the async session schedules the reply
    /// instead.
    pub fn play_round(&mut self, index: usize) -> EngineResult<Round> {
        let human = self.apply_human_move(index)?;
        let system = if human.is_applied() && self.phase() == TurnPhase::SystemTurn {
            Some(self.auto_move()?)
        } else {
            None
        };
        Ok(Round { human, system })
    }

    /// Hand the turn to the other player without a move.
    ///
    /// Ignored once the game is finished.
    pub fn advance_turn(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.state.advance_turn();
        debug!(turn = %self.state.turn(), "turn advanced");
        self.publish(Transition::TurnAdvanced);
    }

    fn reject_reason(&self, player: PlayerId) -> Option<IgnoreReason> {
        if self.state.is_finished() {
            Some(IgnoreReason::GameOver)
        } else if self.state.turn() != player {
            Some(IgnoreReason::NotYourTurn)
        } else {
            None
        }
    }

    /// Apply a move for the player to move and settle the turn.
    fn play(&mut self, index: usize, player: PlayerId) -> EngineResult<MoveResult> {
        let outcome = match self.state.place(index, player) {
            Ok(outcome) => outcome,
            Err(EngineError::AlreadyFilled { .. }) => {
                debug!(index, %player, "cell already filled");
                return Ok(MoveResult::Ignored(IgnoreReason::CellFilled));
            }
            Err(err) => return Err(err),
        };

        match outcome {
            Some(outcome) => info!(index, %player, %outcome, "game finished"),
            None => {
                debug!(index, %player, "move applied");
                self.state.advance_turn();
            }
        }

        Ok(MoveResult::Applied {
            index,
            player,
            outcome,
        })
    }

    // === Board lifecycle ===

    /// Start over on an empty board of the current size.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let size = self.state.size();
        if let Err(err) = self.state.rebuild(size) {
            warn!(%err, "reset failed");
            return;
        }
        info!(size, generation = self.state.generation(), "game reset");
        self.publish(Transition::Reset);
    }

    /// Rebuild the board at `new_size`, clamped to `[3, 25]`.
    ///
    /// Fails with `GameInProgress` once any move has been played. Returns
    /// the size actually applied.
    #[instrument(skip(self))]
    pub fn change_size(&mut self, new_size: usize) -> EngineResult<usize> {
        let filled = self.state.board().count_filled();
        if filled > 0 {
            return Err(EngineError::GameInProgress { filled });
        }

        let size = clamp_size(new_size);
        self.state.rebuild(size)?;
        info!(size, generation = self.state.generation(), "board resized");
        self.publish(Transition::Resized { size });
        Ok(size)
    }

    /// Grow the board by one, up to 25.
    pub fn increment_size(&mut self) -> EngineResult<usize> {
        let size = self.state.size();
        self.change_size((size + 1).min(MAX_SIZE))
    }

    /// Shrink the board by one, down to 3.
    pub fn decrement_size(&mut self) -> EngineResult<usize> {
        let size = self.state.size();
        self.change_size(size.saturating_sub(1).max(MIN_SIZE))
    }

    // === Persistence ===

    /// Capture size and turn, plus the move list and RNG position if
    /// `persist_board` is set.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        let (moves, rng) = if self.config.persist_board {
            (self.state.history().iter().copied().collect(), Some(self.rng.state()))
        } else {
            (Vec::new(), None)
        };

        SavedGame {
            size: self.state.size(),
            turn: self.state.turn().index(),
            moves,
            rng,
        }
    }

    /// Replace the current game with a saved one.
    ///
    /// The size is clamped like `change_size`. With `persist_board` the
    /// moves are replayed through the normal rules and any invalid move
    /// fails the whole restore, leaving the current game untouched, and a
    /// saved RNG position replaces the engine's. Without it the board starts
    /// empty and the RNG keeps its current position.
    #[instrument(skip(self, saved), fields(size = saved.size, turn = saved.turn, moves = saved.moves.len()))]
    pub fn restore(&mut self, saved: &SavedGame) -> EngineResult<()> {
        let size = clamp_size(saved.size);
        if size != saved.size {
            warn!(requested = saved.size, size, "saved size clamped");
        }

        let turn = PlayerId::from_index(saved.turn).unwrap_or_else(|| {
            warn!(turn = saved.turn, "unknown saved turn, human moves first");
            PlayerId::Human
        });

        let mut state = GameState::new(size)?;
        state.set_generation(self.state.generation().wrapping_add(1));

        if self.config.persist_board {
            for (played, record) in saved.moves.iter().enumerate() {
                if state.is_finished() {
                    warn!(ignored = saved.moves.len() - played, "moves after the game ended were dropped");
                    break;
                }
                state.place(record.index, record.player)?;
            }
        }
        state.set_turn(turn);

        if self.config.persist_board {
            if let Some(rng) = &saved.rng {
                self.rng = GameRng::from_state(rng);
            }
        }
        self.state = state;
        info!(phase = ?self.state.phase(), "game restored");
        self.publish(Transition::Restored);
        Ok(())
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("strategy", &self.strategy.name())
            .field("observers", &self.observers)
            .finish()
    }
}
