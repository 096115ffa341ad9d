//! Integration tests for the OSHIHEX engine
//!
//! Drives full games through the public API and checks the engine-wide
//! invariants hold at every step.

use oshihex_core::{
    Color, CpuPlayer, Difficulty, Game, GameMode, StateSnapshot, PIECES_PER_SIDE,
    PUSH_OUT_TARGET,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn assert_invariants(game: &Game) {
    let pieces = game.board().pieces();
    for (i, piece) in pieces.iter().enumerate() {
        assert!(piece.position.is_on_board(), "{} off board", piece.id);
        for other in &pieces[i + 1..] {
            assert_ne!(piece.position, other.position, "{} and {} overlap", piece.id, other.id);
        }
    }
    for color in [Color::Black, Color::White] {
        assert_eq!(
            game.board().count(color) + game.pieces_out(color) as usize,
            PIECES_PER_SIDE,
            "{color} pieces not conserved"
        );
    }
}

/// Play one full game move by move, checking invariants after each half-move
fn play_checked(mode: GameMode, black_seed: u64, white_seed: u64, max_moves: usize) -> Game {
    let mut state = Game::new(mode);
    let mut black = CpuPlayer::with_seed(Difficulty::Easy, black_seed);
    let mut white = CpuPlayer::with_seed(Difficulty::Easy, white_seed);

    let mut moves = 0;
    while state.winner().is_none() && moves < max_moves {
        let color = state.current_turn();
        let player = match color {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let Some(mv) = player.best_move(state.board(), color) else {
            break;
        };
        state = state
            .apply_push_move(mv.piece, mv.direction)
            .expect("CPU move must be accepted by the state machine");
        moves += 1;
        assert_invariants(&state);
    }
    state
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_wrestle_game_keeps_invariants() {
    let final_state = play_checked(GameMode::Wrestle, 11, 12, 500);

    if let Some(winner) = final_state.winner() {
        assert_eq!(final_state.pieces_out(winner.opponent()), PUSH_OUT_TARGET);
        assert!(final_state.pieces_out(winner) < PUSH_OUT_TARGET);
    }
}

#[test]
fn test_lineup_game_keeps_invariants() {
    let final_state = play_checked(GameMode::Lineup, 21, 22, 500);

    if let Some(winner) = final_state.winner() {
        assert!(oshihex_core::has_lineup(final_state.board(), winner));
    }
}

#[test]
fn test_searching_players_are_reproducible() {
    let mut state = Game::new(GameMode::Wrestle);
    let mut black = CpuPlayer::with_seed(Difficulty::Normal, 31);
    let mut white = CpuPlayer::with_seed(Difficulty::Normal, 32);

    let (final_state, history) =
        oshihex_core::self_play(&state, &mut black, &mut white, 40);
    assert!(!history.is_empty());
    assert_invariants(&final_state);

    // Replaying the same seeds reproduces the same game
    state = Game::new(GameMode::Wrestle);
    let mut black = CpuPlayer::with_seed(Difficulty::Normal, 31);
    let mut white = CpuPlayer::with_seed(Difficulty::Normal, 32);
    let (replayed, replay_history) =
        oshihex_core::self_play(&state, &mut black, &mut white, 40);
    assert_eq!(history, replay_history);
    assert_eq!(final_state, replayed);
}

// ============================================================================
// SNAPSHOT BOUNDARY
// ============================================================================

#[test]
fn test_snapshot_file_round_trip() {
    let final_state = play_checked(GameMode::Wrestle, 41, 42, 60);
    let snapshot = StateSnapshot::from_game(&final_state, Difficulty::Hard);

    let path = std::env::temp_dir().join("oshihex-snapshot-roundtrip.json");
    snapshot.save(&path).unwrap();
    let loaded = StateSnapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let rebuilt = loaded.validate().expect("engine-produced snapshot must validate");
    assert_eq!(rebuilt, final_state);
    assert_eq!(loaded.difficulty, Difficulty::Hard);
}

#[test]
fn test_tampered_snapshot_is_rejected() {
    let snapshot = StateSnapshot::from_game(&Game::new(GameMode::Lineup), Difficulty::Easy);
    let mut tampered = snapshot.clone();
    tampered.pieces[3].position = tampered.pieces[7].position;
    assert!(tampered.validate().is_err());
}
