//! CPU opponent: move generation and alpha-beta search
//!
//! The CPU considers single-piece pushes only (one owned piece, one of the
//! six directions); group advances and broadside shifts are a human-only
//! repertoire. Search is plain minimax with alpha-beta pruning over the push
//! resolver, with the easy tier replaced by biased random choice.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Hex, DIRECTIONS};
use crate::eval::{evaluate, Weights};
use crate::game::Game;
use crate::pieces::{Color, PieceId};
use crate::push::{apply_push, resolve_push};

// ============================================================================
// DIFFICULTY AND MOVES
// ============================================================================

/// CPU difficulty tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    /// Search depth in plies; the easy tier never searches
    fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }
}

/// A candidate move: push one piece one step in a direction.
/// Generated and discarded per search node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub piece: PieceId,
    pub direction: Hex,
}

/// All feasible single-piece pushes for `color`, in generation order
/// (piece order on the board, then direction-table order).
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in board.pieces().iter().filter(|p| p.color == color) {
        for &direction in &DIRECTIONS {
            if resolve_push(piece, direction, board).feasible {
                moves.push(Move {
                    piece: piece.id,
                    direction,
                });
            }
        }
    }
    moves
}

/// Apply a move to a board. An unknown piece or infeasible push yields the
/// board unchanged.
pub fn apply_move(board: &Board, mv: Move) -> Board {
    let Some(piece) = board.piece_by_id(mv.piece) else {
        return board.clone();
    };
    let push = resolve_push(piece, mv.direction, board);
    if !push.feasible {
        return board.clone();
    }
    apply_push(&push, board).0
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    color: Color,
    weights: &Weights,
) -> i32 {
    if depth == 0 {
        return evaluate(board, color, weights);
    }

    let side = if maximizing { color } else { color.opponent() };
    let moves = legal_moves(board, side);
    // A side with no moves simply stops the search at this branch
    if moves.is_empty() {
        return evaluate(board, color, weights);
    }

    if maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let child = apply_move(board, mv);
            let score = minimax(&child, depth - 1, alpha, beta, false, color, weights);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let child = apply_move(board, mv);
            let score = minimax(&child, depth - 1, alpha, beta, true, color, weights);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

// ============================================================================
// CPU PLAYER
// ============================================================================

/// CPU player. Owns the RNG used by the easy tier so games are reproducible
/// from a seed.
pub struct CpuPlayer {
    pub difficulty: Difficulty,
    pub weights: Weights,
    rng: ChaCha8Rng,
}

impl CpuPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, 42)
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            weights: Weights::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a move for `color`, or `None` when no piece of that color can
    /// push (in practice: when none remain on the board).
    pub fn best_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        let moves = legal_moves(board, color);
        if moves.is_empty() {
            return None;
        }

        if self.difficulty == Difficulty::Easy {
            return Some(self.random_move(board, &moves));
        }

        let depth = self.difficulty.depth();
        let mut best = moves[0];
        let mut best_score = i32::MIN;
        for &mv in &moves {
            let child = apply_move(board, mv);
            let score = minimax(
                &child,
                depth - 1,
                i32::MIN,
                i32::MAX,
                false,
                color,
                &self.weights,
            );
            // Strictly greater keeps the earliest-generated move on ties
            if score > best_score {
                best_score = score;
                best = mv;
            }
        }
        Some(best)
    }

    /// Easy tier: no search. Half the time, prefer a move that ejects an
    /// opposing piece when one exists; otherwise pick uniformly.
    fn random_move(&mut self, board: &Board, moves: &[Move]) -> Move {
        let ejecting: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| {
                board
                    .piece_by_id(mv.piece)
                    .is_some_and(|p| !resolve_push(p, mv.direction, board).ejected.is_empty())
            })
            .collect();

        if !ejecting.is_empty() && self.rng.gen_bool(0.5) {
            return ejecting[self.rng.gen_range(0..ejecting.len())];
        }
        moves[self.rng.gen_range(0..moves.len())]
    }
}

/// Drive a full CPU-vs-CPU game. Stops at a winner, a side with no moves,
/// or the half-move cap; returns the final state and the move history.
pub fn self_play(
    start: &Game,
    black: &mut CpuPlayer,
    white: &mut CpuPlayer,
    max_moves: usize,
) -> (Game, Vec<Move>) {
    let mut state = start.clone();
    let mut history = Vec::new();

    while state.winner().is_none() && history.len() < max_moves {
        let color = state.current_turn();
        let player = match color {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let Some(mv) = player.best_move(state.board(), color) else {
            break;
        };
        match state.apply_push_move(mv.piece, mv.direction) {
            Ok(next) => {
                history.push(mv);
                state = next;
            }
            Err(_) => break,
        }
    }

    (state, history)
}

// ============================================================================
// TESTS
// ============================================================================
