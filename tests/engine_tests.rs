//! Engine integration tests: turn control, opponents, persistence.

use proptest::prelude::*;
use xox_engine::board::Board;
use xox_engine::core::{Difficulty, EngineConfig, EngineError, GameRng, PlayerId};
use xox_engine::game::{GameEngine, IgnoreReason, MoveResult, SavedGame, TurnPhase};
use xox_engine::opponent::{OpponentStrategy, RandomOpponent};
use xox_engine::rules::Outcome;

/// Plays the highest empty cell, away from the human's top row.
struct LastEmpty;

impl OpponentStrategy for LastEmpty {
    fn select_move(&self, board: &Board, _rng: &mut GameRng) -> Option<usize> {
        board.empty_indices().last().copied()
    }

    fn name(&self) -> &'static str {
        "last-empty"
    }
}

fn engine_with(difficulty: Difficulty, seed: u64) -> GameEngine {
    let config = EngineConfig::default().with_difficulty(difficulty).with_seed(seed);
    GameEngine::new(config).unwrap()
}

/// Play a full game: the human picks uniformly from `human_rng`, the
/// engine's strategy answers immediately.
fn play_out(engine: &mut GameEngine, human_rng: &mut GameRng) -> Outcome {
    loop {
        match engine.phase() {
            TurnPhase::HumanTurn => {
                let empty = engine.state().board().empty_indices();
                let index = *human_rng.choose(&empty).unwrap();
                assert!(engine.apply_human_move(index).unwrap().is_applied());
            }
            TurnPhase::SystemTurn => {
                assert!(engine.auto_move().unwrap().is_applied());
            }
            TurnPhase::Finished => return engine.state().outcome().unwrap(),
        }
    }
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_scripted_human_row_win() {
    let mut engine =
        GameEngine::with_strategy(EngineConfig::default(), Box::new(LastEmpty)).unwrap();

    for index in [0, 1, 2] {
        let round = engine.play_round(index).unwrap();
        assert!(round.human.is_applied());
    }

    assert_eq!(engine.state().outcome(), Some(Outcome::Win(PlayerId::Human)));
    assert_eq!(engine.phase(), TurnPhase::Finished);
    assert_eq!(engine.state().board().count_filled(), 5);
}

#[test]
fn test_seeded_scenario_wins_when_row_is_human() {
    for seed in 0..50 {
        let mut engine = engine_with(Difficulty::Easy, seed);

        for index in [0, 1, 2] {
            if engine.phase() != TurnPhase::HumanTurn {
                break;
            }
            engine.play_round(index).unwrap();
        }

        let board = engine.state().board();
        let row_is_human = (0..3).all(|i| board.get(i).unwrap().owner() == Some(PlayerId::Human));
        if row_is_human {
            assert_eq!(engine.state().outcome(), Some(Outcome::Win(PlayerId::Human)), "seed {seed}");
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut engine = engine_with(Difficulty::Medium, seed);
        let mut human = GameRng::new(seed + 1000);
        play_out(&mut engine, &mut human);
        engine.state().history().iter().copied().collect::<Vec<_>>()
    };

    assert_eq!(play(7), play(7));
}

#[test]
fn test_turns_alternate_over_whole_game() {
    for seed in 0..20 {
        let mut engine = engine_with(Difficulty::Easy, seed);
        let mut human = GameRng::new(seed);
        play_out(&mut engine, &mut human);

        let history = engine.state().history();
        for (ply, record) in history.iter().enumerate() {
            let expected = if ply % 2 == 0 { PlayerId::Human } else { PlayerId::System };
            assert_eq!(record.player, expected, "seed {seed} ply {ply}");
        }
    }
}

#[test]
fn test_minimax_never_loses_to_random_play() {
    for seed in 0..30 {
        let mut engine = engine_with(Difficulty::Hard, seed);
        let mut human = GameRng::new(seed * 31 + 5);
        let outcome = play_out(&mut engine, &mut human);
        assert_ne!(outcome, Outcome::Win(PlayerId::Human), "seed {seed}");
    }
}

#[test]
fn test_tactical_blocks_open_row() {
    let mut engine = engine_with(Difficulty::Medium, 3);
    engine.apply_human_move(0).unwrap();
    engine.auto_move().unwrap();

    // If the opponent did not already take 1 or 2, it must block after 0, 1.
    let board = engine.state().board().clone();
    if board.get(1).unwrap().is_filled() || board.get(2).unwrap().is_filled() {
        return;
    }
    engine.apply_human_move(1).unwrap();
    let reply = engine.auto_move().unwrap();
    assert_eq!(
        reply,
        MoveResult::Applied { index: 2, player: PlayerId::System, outcome: None }
    );
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_move_after_finish_is_ignored() {
    let mut engine =
        GameEngine::with_strategy(EngineConfig::default(), Box::new(LastEmpty)).unwrap();
    for index in [0, 1, 2] {
        engine.play_round(index).unwrap();
    }

    let before = engine.snapshot();
    assert_eq!(
        engine.apply_human_move(3).unwrap(),
        MoveResult::Ignored(IgnoreReason::GameOver)
    );
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_size_guard_then_reset() {
    let mut engine = engine_with(Difficulty::Easy, 1);
    engine.play_round(4).unwrap();

    assert!(matches!(engine.change_size(7), Err(EngineError::GameInProgress { .. })));
    assert!(matches!(engine.increment_size(), Err(EngineError::GameInProgress { .. })));

    engine.reset();
    assert_eq!(engine.change_size(7), Ok(7));
    assert_eq!(engine.state().board().empty_indices().len(), 49);
}

proptest! {
    #[test]
    fn prop_filled_cell_move_is_noop(seed in 0u64..500, moves in 1usize..8) {
        let mut engine = engine_with(Difficulty::Easy, seed);
        let mut human = GameRng::new(seed);

        for _ in 0..moves {
            if engine.phase() != TurnPhase::HumanTurn {
                break;
            }
            let empty = engine.state().board().empty_indices();
            let index = *human.choose(&empty).unwrap();
            engine.play_round(index).unwrap();
        }

        if engine.phase() == TurnPhase::HumanTurn {
            let filled = engine.state().history()[0].index;
            let before = engine.snapshot();
            prop_assert_eq!(
                engine.apply_human_move(filled).unwrap(),
                MoveResult::Ignored(IgnoreReason::CellFilled)
            );
            prop_assert_eq!(engine.snapshot(), before);
        }
    }

    #[test]
    fn prop_random_opponent_picks_empty_cell(size in 3usize..=8, seed in any::<u64>(), filled in 0usize..40) {
        let mut board = Board::new(size).unwrap();
        let mut rng = GameRng::new(seed);
        for _ in 0..filled.min(size * size - 1) {
            let empty = board.empty_indices();
            let index = *rng.choose(&empty).unwrap();
            board.set(index, PlayerId::Human).unwrap();
        }

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let index = difficulty.strategy().select_move(&board, &mut rng).unwrap();
            prop_assert!(!board.get(index).unwrap().is_filled());
        }
        prop_assert!(RandomOpponent.select_move(&board, &mut rng).is_some());
    }

    #[test]
    fn prop_size_is_always_clamped(requested in 0usize..100) {
        let mut engine = engine_with(Difficulty::Easy, 0);
        let size = engine.change_size(requested).unwrap();
        prop_assert!((3..=25).contains(&size));
        prop_assert_eq!(engine.state().board().cell_count(), size * size);
    }
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_saved_bytes_restore_with_board() {
    let config = EngineConfig::default().with_persist_board(true).with_seed(9);
    let mut engine = GameEngine::new(config.clone()).unwrap();
    engine.play_round(4).unwrap();
    engine.play_round(engine.state().board().empty_indices()[0]).unwrap();

    let bytes = engine.save().to_bytes().unwrap();
    let saved = SavedGame::from_bytes(&bytes).unwrap();

    let mut restored = GameEngine::new(config).unwrap();
    restored.restore(&saved).unwrap();
    assert_eq!(restored.state().board(), engine.state().board());
    assert_eq!(restored.state().turn(), engine.state().turn());
    assert_eq!(restored.state().outcome(), engine.state().outcome());
}

#[test]
fn test_restore_without_board_keeps_size_and_turn() {
    let mut engine = engine_with(Difficulty::Easy, 2);
    engine.change_size(6).unwrap();
    engine.apply_human_move(10).unwrap();

    let saved = engine.save();
    assert!(saved.moves.is_empty());

    let mut restored = engine_with(Difficulty::Easy, 2);
    restored.restore(&saved).unwrap();
    assert_eq!(restored.state().size(), 6);
    assert_eq!(restored.state().turn(), PlayerId::System);
    assert_eq!(restored.state().board().count_filled(), 0);
}

#[test]
fn test_corrupt_bytes_rejected() {
    assert!(matches!(SavedGame::from_bytes(&[1, 2, 3]), Err(EngineError::Codec(_))));
}
