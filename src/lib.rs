//! # xox-engine
//!
//! An N×N tic-tac-toe rules engine for one human against a computer
//! opponent.
//!
//! ## Design Principles
//!
//! 1. **Any Size**: Boards from 3×3 to 25×25. A player wins by owning a
//!    complete row, column, or diagonal through their last move.
//!
//! 2. **Rules Without Side Effects**: `check_outcome` only reads the board.
//!    The engine applies a move atomically and then asks for the outcome.
//!
//! 3. **Pluggable Opponent**: The system player is an `OpponentStrategy`
//!    trait object chosen by `Difficulty`, seeded from `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Synchronous core**: `GameEngine` owns the state and has a single
//!   writer. Observers are called in transition order.
//!
//! - **Async shell**: `session::GameSession` runs the engine on a tokio task
//!   and plays the opponent after a configurable delay. Results scheduled
//!   for a board that has since been reset are discarded.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `board`: Cells and the N×N grid
//! - `rules`: Line enumeration and win/draw detection
//! - `opponent`: Move selection strategies
//! - `game`: Turn control, observers, save/restore
//! - `session`: tokio actor and delayed opponent moves

pub mod core;
pub mod board;
pub mod rules;
pub mod opponent;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    clamp_size, Difficulty, EngineConfig, MAX_SIZE, MIN_SIZE,
    EngineError, EngineResult,
    GameRng, GameRngState,
    PlayerId,
};

pub use crate::board::{Board, Cell};

pub use crate::rules::{check_outcome, lines_through, Line, LineKind, Outcome};

pub use crate::opponent::{MinimaxOpponent, OpponentStrategy, RandomOpponent, TacticalOpponent};

pub use crate::game::{
    GameEngine, GameState, IgnoreReason, MoveRecord, MoveResult, Round,
    SavedGame, StateChange, SubscriptionId, Transition, TurnPhase,
};

pub use crate::session::{GameSession, PendingMove, SessionHandle};
