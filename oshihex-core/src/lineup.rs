//! Aligned-run detection for line-up mode

use crate::board::{Board, Hex, DIRECTIONS};
use crate::pieces::Color;

/// Run length that wins line-up mode
pub const LINEUP_RUN: usize = 4;

/// The three hex axes, one representative direction each
const AXES: [Hex; 3] = [DIRECTIONS[0], DIRECTIONS[1], DIRECTIONS[5]];

/// Contiguous same-color pieces extending from `start` in `direction`,
/// excluding `start` itself
fn run_length(start: Hex, direction: Hex, color: Color, board: &Board) -> usize {
    let mut count = 0;
    let mut pos = start + direction;
    while board.piece_at(pos).is_some_and(|p| p.color == color) {
        count += 1;
        pos = pos + direction;
    }
    count
}

/// True when `color` has four or more contiguous pieces along any axis
pub fn has_lineup(board: &Board, color: Color) -> bool {
    board
        .pieces()
        .iter()
        .filter(|p| p.color == color)
        .any(|piece| {
            AXES.iter().any(|&axis| {
                let forward = run_length(piece.position, axis, color, board);
                let backward = run_length(piece.position, -axis, color, board);
                1 + forward + backward >= LINEUP_RUN
            })
        })
}

/// Winner under line-up rules; black is checked first
pub fn lineup_winner(board: &Board) -> Option<Color> {
    if has_lineup(board, Color::Black) {
        Some(Color::Black)
    } else if has_lineup(board, Color::White) {
        Some(Color::White)
    } else {
        None
    }
}
