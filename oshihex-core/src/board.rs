//! Hex board geometry with axial coordinates, plus piece lookup

use serde::{Deserialize, Serialize};

use crate::pieces::{Color, Piece, PieceId};

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Number of cells on the radius-4 board
pub const BOARD_CELLS: usize = 61;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Derived third axis coordinate, `s = -q - r`
    pub const fn s(self) -> i8 {
        -self.q - self.r
    }

    /// Check if this hex is on the board
    pub fn is_on_board(self) -> bool {
        self.distance_to_center() <= BOARD_RADIUS
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(self) -> i8 {
        (self.q.abs() + (self.q + self.r).abs() + self.r.abs()) / 2
    }

    /// Distance between two hexes
    pub fn distance_to(self, other: Hex) -> i8 {
        let dq = (self.q - other.q).abs();
        let dm = ((self.q + self.r) - (other.q + other.r)).abs();
        let dr = (self.r - other.r).abs();
        (dq + dm + dr) / 2
    }

    /// True when the two hexes share one of the three axes
    pub fn is_aligned_with(self, other: Hex) -> bool {
        self.q == other.q || self.r == other.r || self.s() == other.s()
    }

    /// The six adjacent cells, in direction-table order
    pub fn neighbors(self) -> impl Iterator<Item = Hex> {
        DIRECTIONS.into_iter().map(move |d| self + d)
    }
}

impl std::ops::Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }
}

impl std::ops::Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r)
    }
}

impl std::ops::Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

/// Unit direction vectors in axial coordinates
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),   // E
    Hex::new(1, -1),  // NE
    Hex::new(0, -1),  // NW
    Hex::new(-1, 0),  // W
    Hex::new(-1, 1),  // SW
    Hex::new(0, 1),   // SE
];

/// Unit direction from `from` to `to`.
///
/// Defined for any pair aligned with one of the six directions, at any
/// distance; the delta is normalized by the hex distance. Returns `None`
/// for identical or non-aligned pairs.
pub fn direction_between(from: Hex, to: Hex) -> Option<Hex> {
    let dist = from.distance_to(to);
    if dist == 0 {
        return None;
    }

    let delta = to - from;
    if delta.q % dist != 0 || delta.r % dist != 0 {
        return None;
    }

    let dir = Hex::new(delta.q / dist, delta.r / dist);
    DIRECTIONS.contains(&dir).then_some(dir)
}

/// All cells of the radius-4 board, via the axial range formula
pub fn board_cells() -> Vec<Hex> {
    let mut cells = Vec::with_capacity(BOARD_CELLS);
    for q in -BOARD_RADIUS..=BOARD_RADIUS {
        let r_min = (-BOARD_RADIUS).max(-q - BOARD_RADIUS);
        let r_max = BOARD_RADIUS.min(-q + BOARD_RADIUS);
        for r in r_min..=r_max {
            cells.push(Hex::new(q, r));
        }
    }
    cells
}

/// Piece collection with coordinate lookups.
///
/// Positions are replaced wholesale per move: every transformation builds a
/// new `Board` instead of mutating in place, so callers can keep or discard
/// prior states freely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Board {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Occupant of a cell, if any
    pub fn piece_at(&self, hex: Hex) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.position == hex)
    }

    /// True when no piece occupies the cell (off-board cells read as free)
    pub fn is_free(&self, hex: Hex) -> bool {
        self.piece_at(hex).is_none()
    }

    pub fn piece_by_id(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Number of pieces of the given color still on the board
    pub fn count(&self, color: Color) -> usize {
        self.pieces.iter().filter(|p| p.color == color).count()
    }
}
