//! Static board evaluation

use serde::{Deserialize, Serialize};

use crate::board::{Board, BOARD_RADIUS};
use crate::pieces::Color;

/// Tunable evaluation weights
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Points per piece of material advantage
    pub material: i32,
    /// Points per step of center proximity, per piece
    pub centrality: i32,
    /// Points per opposing piece sitting on the rim (easy to push off)
    pub edge_threat: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            material: 100,
            centrality: 5,
            edge_threat: 10,
        }
    }
}

/// Score a board from `color`'s perspective; larger is better.
///
/// Material difference dominates; centrality rewards positions that are hard
/// to push out; rim-bound opponents are a standing threat worth pressing.
pub fn evaluate(board: &Board, color: Color, weights: &Weights) -> i32 {
    let radius = BOARD_RADIUS as i32;
    let mut own = 0;
    let mut opp = 0;
    let mut score = 0;

    for piece in board.pieces() {
        let dist = piece.position.distance_to_center() as i32;
        let position_score = weights.centrality * (radius - dist);

        if piece.color == color {
            own += 1;
            score += position_score;
        } else {
            opp += 1;
            score -= position_score;
            if dist >= radius {
                score += weights.edge_threat;
            }
        }
    }

    score + weights.material * (own - opp)
}
