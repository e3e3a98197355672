//! Turn control, observers, and persistence for a single game.

mod engine;
mod observer;
mod persist;
mod state;

pub use engine::{GameEngine, IgnoreReason, MoveResult, Round};
pub use observer::{Observer, StateChange, SubscriptionId, Transition};
pub use persist::SavedGame;
pub use state::{GameState, MoveRecord, TurnPhase};
