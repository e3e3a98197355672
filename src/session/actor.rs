//! Session actor: one task owns the engine, commands arrive over a channel.
//!
//! ## Flow
//!
//! ```text
//! SessionHandle --Command--> GameSession (owns GameEngine)
//!                                 |
//!                     human move leaves SystemTurn
//!                                 v
//!                  schedule_opponent_move(delay)
//!                                 |
//!                 OpponentDue { generation } --> auto_move_for
//! ```
//!
//! Commands are applied one at a time, so the engine has a single writer.
//! Reset, resize, and restore drop the pending opponent move; a due message
//! that slips through anyway is discarded by the generation check. A move
//! the strategy gets wrong (a filled cell, or none at all) is retried after
//! another delay, so the session never stalls in `SystemTurn`.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::timer::{schedule_opponent_move, PendingMove};
use crate::core::{Difficulty, EngineError, EngineResult};
use crate::game::{
    GameEngine, GameState, IgnoreReason, MoveResult, SavedGame, StateChange, SubscriptionId,
    TurnPhase,
};

enum Command {
    HumanMove {
        index: usize,
        reply: oneshot::Sender<EngineResult<MoveResult>>,
    },
    ChangeSize {
        size: usize,
        reply: oneshot::Sender<EngineResult<usize>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
    SetDifficulty {
        difficulty: Difficulty,
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<GameState>,
    },
    Save {
        reply: oneshot::Sender<SavedGame>,
    },
    Restore {
        saved: SavedGame,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    Subscribe {
        reply: oneshot::Sender<mpsc::UnboundedReceiver<StateChange>>,
    },
    OpponentDue {
        generation: u64,
    },
    Shutdown {
        reply: oneshot::Sender<GameEngine>,
    },
}

/// The actor owning a `GameEngine`.
pub struct GameSession {
    engine: GameEngine,
    commands: mpsc::UnboundedReceiver<Command>,
    /// Weak, so dropping every handle still stops the actor.
    self_tx: mpsc::WeakUnboundedSender<Command>,
    /// The scheduled opponent move and the board generation it is for.
    pending: Option<(u64, PendingMove)>,
    forwards: Vec<(SubscriptionId, mpsc::UnboundedSender<StateChange>)>,
}

impl GameSession {
    /// Spawn the actor on the current tokio runtime.
    pub fn spawn(engine: GameEngine) -> SessionHandle {
        let (tx, commands) = mpsc::unbounded_channel();
        let session = GameSession {
            engine,
            commands,
            self_tx: tx.downgrade(),
            pending: None,
            forwards: Vec::new(),
        };
        tokio::spawn(session.run());
        SessionHandle { commands: tx }
    }

    async fn run(mut self) {
        info!(
            size = self.engine.state().size(),
            strategy = self.engine.strategy_name(),
            "session started"
        );

        while let Some(command) = self.commands.recv().await {
            if let Some(reply) = self.handle(command) {
                self.pending = None;
                info!("session shut down");
                let _ = reply.send(self.engine);
                return;
            }
            self.prune_forwards();
        }

        debug!("all session handles dropped");
    }

    /// Apply one command. Returns the reply channel on shutdown.
    fn handle(&mut self, command: Command) -> Option<oneshot::Sender<GameEngine>> {
        match command {
            Command::HumanMove { index, reply } => {
                let result = self.engine.apply_human_move(index);
                if matches!(result, Ok(MoveResult::Applied { .. })) {
                    self.schedule_if_system_turn();
                }
                let _ = reply.send(result);
            }
            Command::ChangeSize { size, reply } => {
                let result = self.engine.change_size(size);
                if result.is_ok() {
                    self.pending = None;
                }
                let _ = reply.send(result);
            }
            Command::Reset { reply } => {
                self.pending = None;
                self.engine.reset();
                let _ = reply.send(());
            }
            Command::SetDifficulty { difficulty, reply } => {
                self.engine.set_difficulty(difficulty);
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Command::Save { reply } => {
                let _ = reply.send(self.engine.save());
            }
            Command::Restore { saved, reply } => {
                let result = self.engine.restore(&saved);
                if result.is_ok() {
                    self.pending = None;
                    self.schedule_if_system_turn();
                }
                let _ = reply.send(result);
            }
            Command::Subscribe { reply } => {
                let (tx, rx) = mpsc::unbounded_channel();
                let forward = tx.clone();
                let id = self.engine.subscribe(move |change: &StateChange| {
                    let _ = forward.send(change.clone());
                });
                self.forwards.push((id, tx));
                let _ = reply.send(rx);
            }
            Command::OpponentDue { generation } => {
                // A due message from an older board must not drop the move
                // scheduled for the current one.
                if matches!(self.pending, Some((scheduled, _)) if scheduled == generation) {
                    self.pending = None;
                }
                match self.engine.auto_move_for(generation) {
                    Ok(MoveResult::Ignored(
                        reason @ (IgnoreReason::CellFilled | IgnoreReason::NoMoveAvailable),
                    )) => {
                        warn!(?reason, strategy = self.engine.strategy_name(), "opponent move rejected, retrying");
                        self.schedule_if_system_turn();
                    }
                    Ok(result) => debug!(generation, ?result, "opponent move resolved"),
                    Err(err) => {
                        warn!(%err, strategy = self.engine.strategy_name(), "opponent move failed, retrying");
                        self.schedule_if_system_turn();
                    }
                }
            }
            Command::Shutdown { reply } => return Some(reply),
        }
        None
    }

    fn schedule_if_system_turn(&mut self) {
        if self.engine.phase() != TurnPhase::SystemTurn {
            return;
        }

        let generation = self.engine.state().generation();
        let delay = self.engine.config().opponent_delay();
        let tx = self.self_tx.clone();
        debug!(generation, ?delay, "opponent move scheduled");

        let pending = schedule_opponent_move(delay, move || {
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(Command::OpponentDue { generation });
            }
        });
        self.pending = Some((generation, pending));
    }

    /// Unsubscribe forwarders whose receiver was dropped.
    fn prune_forwards(&mut self) {
        let engine = &mut self.engine;
        self.forwards.retain(|(id, tx)| {
            if tx.is_closed() {
                engine.unsubscribe(*id);
                false
            } else {
                true
            }
        });
    }
}

/// Cloneable handle to a running `GameSession`.
///
/// Every method fails with `SessionClosed` once the actor has stopped.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> EngineResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| EngineError::SessionClosed)?;
        response.await.map_err(|_| EngineError::SessionClosed)
    }

    /// Play `index` for the human. The opponent reply follows after the
    /// configured delay.
    pub async fn apply_human_move(&self, index: usize) -> EngineResult<MoveResult> {
        self.request(|reply| Command::HumanMove { index, reply }).await?
    }

    /// See `GameEngine::change_size`.
    pub async fn change_size(&self, size: usize) -> EngineResult<usize> {
        self.request(|reply| Command::ChangeSize { size, reply }).await?
    }

    pub async fn reset(&self) -> EngineResult<()> {
        self.request(|reply| Command::Reset { reply }).await
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> EngineResult<()> {
        self.request(|reply| Command::SetDifficulty { difficulty, reply }).await
    }

    /// Current state.
    pub async fn snapshot(&self) -> EngineResult<GameState> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub async fn save(&self) -> EngineResult<SavedGame> {
        self.request(|reply| Command::Save { reply }).await
    }

    /// See `GameEngine::restore`. Schedules the opponent if the restored
    /// game is waiting on it.
    pub async fn restore(&self, saved: SavedGame) -> EngineResult<()> {
        self.request(|reply| Command::Restore { saved, reply }).await?
    }

    /// Receive every subsequent state change.
    ///
    /// Dropping the receiver unsubscribes after the next command.
    pub async fn subscribe(&self) -> EngineResult<mpsc::UnboundedReceiver<StateChange>> {
        self.request(|reply| Command::Subscribe { reply }).await
    }

    /// Stop the actor and take back the engine. Any pending opponent move
    /// is cancelled.
    pub async fn shutdown(&self) -> EngineResult<GameEngine> {
        self.request(|reply| Command::Shutdown { reply }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, PlayerId};
    use crate::game::Transition;
    use std::time::Duration;
    use tokio::time::Instant;

    fn session() -> SessionHandle {
        let config = EngineConfig::default().with_difficulty(Difficulty::Easy);
        GameSession::spawn(GameEngine::new(config).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_opponent_replies_after_delay() {
        let handle = session();
        let mut changes = handle.subscribe().await.unwrap();
        let start = Instant::now();

        let result = handle.apply_human_move(4).await.unwrap();
        assert!(result.is_applied());

        let human = changes.recv().await.unwrap();
        assert_eq!(human.transition, Transition::HumanMove { index: 4 });
        assert_eq!(human.state.phase(), TurnPhase::SystemTurn);

        let system = changes.recv().await.unwrap();
        assert!(matches!(system.transition, Transition::SystemMove { .. }));
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(system.state.phase(), TurnPhase::HumanTurn);
        assert_eq!(system.state.board().count_filled(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_cannot_move_during_delay() {
        let handle = session();
        handle.apply_human_move(0).await.unwrap();

        assert_eq!(
            handle.apply_human_move(1).await.unwrap(),
            MoveResult::Ignored(IgnoreReason::NotYourTurn)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending_move() {
        let handle = session();
        let mut changes = handle.subscribe().await.unwrap();

        handle.apply_human_move(4).await.unwrap();
        handle.reset().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        let state = handle.snapshot().await.unwrap();
        assert_eq!(state.board().count_filled(), 0);
        assert_eq!(state.phase(), TurnPhase::HumanTurn);

        assert_eq!(changes.recv().await.unwrap().transition, Transition::HumanMove { index: 4 });
        assert_eq!(changes.recv().await.unwrap().transition, Transition::Reset);
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_size_guard() {
        let handle = session();
        handle.apply_human_move(0).await.unwrap();

        assert_eq!(
            handle.change_size(5).await,
            Err(EngineError::GameInProgress { filled: 1 })
        );

        handle.reset().await.unwrap();
        assert_eq!(handle.change_size(5).await, Ok(5));
        assert_eq!(handle.snapshot().await.unwrap().board().cell_count(), 25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_into_system_turn_schedules_opponent() {
        let handle = session();
        let mut changes = handle.subscribe().await.unwrap();

        let saved = SavedGame { size: 4, turn: PlayerId::System.index(), moves: vec![], rng: None };
        handle.restore(saved).await.unwrap();
        assert_eq!(changes.recv().await.unwrap().transition, Transition::Restored);

        let system = changes.recv().await.unwrap();
        assert!(matches!(system.transition, Transition::SystemMove { .. }));
        assert_eq!(system.state.size(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_and_difficulty() {
        let handle = session();
        handle.set_difficulty(Difficulty::Hard).await.unwrap();
        handle.apply_human_move(4).await.unwrap();

        let saved = handle.save().await.unwrap();
        assert_eq!(saved.size, 3);
        assert_eq!(saved.turn, PlayerId::System.index());
        assert!(saved.moves.is_empty());

        let engine = handle.shutdown().await.unwrap();
        assert_eq!(engine.strategy_name(), "minimax");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_returns_engine_and_closes() {
        let handle = session();
        handle.apply_human_move(8).await.unwrap();

        let engine = handle.shutdown().await.unwrap();
        assert_eq!(engine.state().board().count_filled(), 1);
        assert_eq!(engine.phase(), TurnPhase::SystemTurn);

        assert_eq!(handle.snapshot().await, Err(EngineError::SessionClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_subscriber_is_pruned() {
        let handle = session();
        let changes = handle.subscribe().await.unwrap();
        drop(changes);

        // The next command observes the closed receiver and unsubscribes.
        handle.reset().await.unwrap();
        handle.reset().await.unwrap();

        let engine = handle.shutdown().await.unwrap();
        assert!(format!("{engine:?}").contains("count: 0"));
    }
}
