//! Group movement: single steps, in-line advances, broadside shifts
//!
//! A selection of 1-3 own pieces moves as a unit. Groups must form a
//! contiguous line on one of the three hex axes; they can advance along that
//! axis, shift sideways into empty cells, or push through the lead piece.

use rustc_hash::FxHashSet;

use crate::board::{direction_between, Board, Hex, DIRECTIONS};
use crate::pieces::{Piece, PieceId};
use crate::push::{apply_push, push_targets, resolve_push};

/// Selection validity: 1 piece always, 2 pieces when adjacent, 3 pieces when
/// collinear and contiguous (pairwise distance pattern {1,1,2}).
pub fn is_valid_selection(selection: &[Piece]) -> bool {
    match selection {
        [] | [_] => true,
        [a, b] => a.position.distance_to(b.position) == 1,
        [a, b, c] => {
            let (a, b, c) = (a.position, b.position, c.position);
            let (Some(d01), Some(d02), Some(d12)) = (
                direction_between(a, b),
                direction_between(a, c),
                direction_between(b, c),
            ) else {
                return false;
            };

            let same_axis = |x: Hex, y: Hex| x == y || x == -y;
            if !(same_axis(d01, d02) && same_axis(d01, d12)) {
                return false;
            }

            let mut dists = [a.distance_to(b), b.distance_to(c), a.distance_to(c)];
            dists.sort_unstable();
            dists == [1, 1, 2]
        }
        _ => false,
    }
}

/// Empty on-board neighbor cells of a lone piece
pub fn single_piece_moves(piece: &Piece, board: &Board) -> Vec<Hex> {
    piece
        .position
        .neighbors()
        .filter(|&dest| dest.is_on_board() && board.is_free(dest))
        .collect()
}

/// In-line advances: one cell past either end of the group's own axis.
///
/// A single-piece selection falls back to its six-neighbor step moves.
pub fn inline_moves(selection: &[Piece], board: &Board) -> Vec<Hex> {
    match selection {
        [] => return Vec::new(),
        [piece] => return single_piece_moves(piece, board),
        _ => {}
    }
    if !is_valid_selection(selection) {
        return Vec::new();
    }

    let positions: Vec<Hex> = selection.iter().map(|p| p.position).collect();
    let Some(dir) = direction_between(positions[0], positions[1]) else {
        return Vec::new();
    };

    // Walk to both ends of the line
    let mut head = positions[0];
    while positions.contains(&(head + dir)) {
        head = head + dir;
    }
    let mut tail = positions[0];
    while positions.contains(&(tail + -dir)) {
        tail = tail + -dir;
    }

    let mut moves = Vec::new();
    let head_dest = head + dir;
    if head_dest.is_on_board() && board.is_free(head_dest) {
        moves.push(head_dest);
    }
    let tail_dest = tail + -dir;
    if tail_dest.is_on_board() && board.is_free(tail_dest) {
        moves.push(tail_dest);
    }
    moves
}

/// Broadside shifts: the 4 directions off the group's axis, every member's
/// destination empty and on board. The lead piece's destination stands for
/// the whole group.
pub fn broadside_moves(selection: &[Piece], board: &Board) -> Vec<Hex> {
    if selection.len() <= 1 || !is_valid_selection(selection) {
        return Vec::new();
    }

    let positions: Vec<Hex> = selection.iter().map(|p| p.position).collect();
    let Some(line_dir) = direction_between(positions[0], positions[1]) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    for dir in DIRECTIONS {
        if dir == line_dir || dir == -line_dir {
            continue;
        }
        let clear = positions
            .iter()
            .all(|&pos| (pos + dir).is_on_board() && board.is_free(pos + dir));
        if clear {
            moves.push(positions[0] + dir);
        }
    }
    moves
}

/// Every legal destination for the selection: in-line and broadside moves
/// plus the lead piece's push targets, de-duplicated.
pub fn valid_moves(selection: &[Piece], board: &Board) -> Vec<Hex> {
    if selection.is_empty() {
        return Vec::new();
    }
    if selection.len() > 1 && !is_valid_selection(selection) {
        return Vec::new();
    }

    let mut moves = inline_moves(selection, board);
    for dest in broadside_moves(selection, board) {
        if !moves.contains(&dest) {
            moves.push(dest);
        }
    }
    for dest in push_targets(&selection[0], board) {
        if !moves.contains(&dest) {
            moves.push(dest);
        }
    }
    moves
}

/// Apply the move that reaches `target`, disambiguating in-line, broadside
/// and push. Returns the new board and any ejected pieces, or `None` when
/// the target is not a legal destination for this selection.
pub fn apply_group_move(
    selection: &[Piece],
    target: Hex,
    board: &Board,
) -> Option<(Board, Vec<Piece>)> {
    let lead = selection.first()?;

    if selection.len() == 1 {
        // A lone piece always moves through the push resolver; stepping into
        // an empty cell is a push of a one-piece line.
        let delta = target - lead.position;
        if !DIRECTIONS.contains(&delta) {
            return None;
        }
        let push = resolve_push(lead, delta, board);
        return push.feasible.then(|| apply_push(&push, board));
    }

    if !is_valid_selection(selection) {
        return None;
    }

    if inline_moves(selection, board).contains(&target) {
        let delta = inline_delta(selection, target)?;
        return Some((translate(selection, delta, board), Vec::new()));
    }

    if broadside_moves(selection, board).contains(&target) {
        let delta = target - selection[0].position;
        return Some((translate(selection, delta, board), Vec::new()));
    }

    // Push through the lead piece
    let delta = target - lead.position;
    if !DIRECTIONS.contains(&delta) {
        return None;
    }
    let push = resolve_push(lead, delta, board);
    push.feasible.then(|| apply_push(&push, board))
}

/// The uniform step for an in-line advance: the unit delta from whichever
/// end piece is adjacent to the target.
fn inline_delta(selection: &[Piece], target: Hex) -> Option<Hex> {
    selection.iter().find_map(|piece| {
        let delta = target - piece.position;
        DIRECTIONS.contains(&delta).then_some(delta)
    })
}

fn translate(selection: &[Piece], delta: Hex, board: &Board) -> Board {
    let ids: FxHashSet<PieceId> = selection.iter().map(|p| p.id).collect();
    Board::new(
        board
            .pieces()
            .iter()
            .map(|piece| {
                let mut piece = piece.clone();
                if ids.contains(&piece.id) {
                    piece.position = piece.position + delta;
                }
                piece
            })
            .collect(),
    )
}
