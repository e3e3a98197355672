//! Async host for a `GameEngine`.
//!
//! The engine itself never sleeps or spawns. This module adds the delayed
//! opponent move on top of tokio: a single actor task owns the engine and
//! a timer enqueues the opponent's turn after `EngineConfig::opponent_delay`.

mod actor;
mod timer;

pub use actor::{GameSession, SessionHandle};
pub use timer::{schedule_opponent_move, PendingMove};
