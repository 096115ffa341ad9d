//! Push resolution along a line of pieces
//!
//! A push moves a contiguous line one step: same-color pieces behind the
//! selected one travel with it, anything ahead (either color) is shoved, and
//! the piece at the very front falls off the board if no cell remains beyond
//! it. There is no outnumbering requirement: any contiguous line pushes as
//! long as the walk terminates at an empty cell or the board edge.

use rustc_hash::FxHashMap;

use crate::board::{Board, Hex, DIRECTIONS};
use crate::pieces::{Piece, PieceId};

/// Outcome of resolving one push.
///
/// Consumed immediately by `apply_push`; never persisted. At most one piece
/// is ejected per push (the one at the front of the line).
#[derive(Clone, Debug, Default)]
pub struct PushResult {
    pub feasible: bool,
    pub ejected: Vec<Piece>,
    pub new_positions: FxHashMap<PieceId, Hex>,
}

/// Resolve pushing `piece` one step in `direction`.
///
/// Walks backward collecting contiguous same-color supporters, then forward
/// collecting the full line of pieces (any color) up to the first gap. The
/// front piece is ejected when the cell beyond it is off the board; otherwise
/// the whole line advances into the empty cell.
pub fn resolve_push(piece: &Piece, direction: Hex, board: &Board) -> PushResult {
    let mut line: Vec<&Piece> = Vec::new();

    // Supporters behind the pushed piece, farthest-back first
    let mut supporters: Vec<&Piece> = Vec::new();
    let mut back = piece.position + -direction;
    while let Some(p) = board.piece_at(back) {
        if p.color != piece.color {
            break;
        }
        supporters.push(p);
        back = back + -direction;
    }
    line.extend(supporters.into_iter().rev());
    line.push(piece);

    // Everything ahead, any color, up to the first empty cell
    let mut ahead = piece.position + direction;
    while let Some(p) = board.piece_at(ahead) {
        line.push(p);
        ahead = ahead + direction;
    }

    let front = line[line.len() - 1];
    let beyond = front.position + direction;

    let mut result = PushResult {
        feasible: true,
        ..PushResult::default()
    };

    if !beyond.is_on_board() {
        // The front piece leaves the board; the rest advance one step
        result.ejected.push(front.clone());
        for p in &line[..line.len() - 1] {
            result.new_positions.insert(p.id, p.position + direction);
        }
    } else {
        // The walk stopped at an empty on-board cell; everyone advances
        for p in &line {
            result.new_positions.insert(p.id, p.position + direction);
        }
    }

    result
}

/// Apply a resolved push, returning the new board and the ejected pieces
pub fn apply_push(result: &PushResult, board: &Board) -> (Board, Vec<Piece>) {
    let mut pieces = Vec::with_capacity(board.len());
    let mut ejected = Vec::new();

    for piece in board.pieces() {
        if result.ejected.iter().any(|e| e.id == piece.id) {
            ejected.push(piece.clone());
            continue;
        }
        let mut piece = piece.clone();
        if let Some(&position) = result.new_positions.get(&piece.id) {
            piece.position = position;
        }
        pieces.push(piece);
    }

    (Board::new(pieces), ejected)
}

/// Every direction `piece` can push in, with the resolved outcome
pub fn push_directions(piece: &Piece, board: &Board) -> Vec<(Hex, PushResult)> {
    DIRECTIONS
        .iter()
        .filter_map(|&direction| {
            let result = resolve_push(piece, direction, board);
            result.feasible.then_some((direction, result))
        })
        .collect()
}

/// On-board one-step target cells for every feasible push from `piece`
pub fn push_targets(piece: &Piece, board: &Board) -> Vec<Hex> {
    push_directions(piece, board)
        .into_iter()
        .map(|(direction, _)| piece.position + direction)
        .filter(|target| target.is_on_board())
        .collect()
}
