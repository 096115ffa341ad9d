//! Piece identity, colors, and the fixed starting layout

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Hex;

/// Piece color; black moves first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Black => "black",
            Color::White => "white",
        })
    }
}

/// Pieces per color at game start
pub const PIECES_PER_SIDE: usize = 14;

/// Stable piece identity: a color plus a per-color ordinal.
///
/// The canonical spelling is `black-3` / `white-12`; that form is also the
/// serialized representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub color: Color,
    pub ordinal: u8,
}

impl PieceId {
    pub const fn new(color: Color, ordinal: u8) -> Self {
        Self { color, ordinal }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.color, self.ordinal)
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("piece id must be of the form black-N / white-N")]
pub struct ParsePieceIdError;

impl FromStr for PieceId {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (color, ordinal) = s.split_once('-').ok_or(ParsePieceIdError)?;
        let color = match color {
            "black" => Color::Black,
            "white" => Color::White,
            _ => return Err(ParsePieceIdError),
        };
        if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParsePieceIdError);
        }
        let ordinal = ordinal.parse().map_err(|_| ParsePieceIdError)?;
        Ok(Self { color, ordinal })
    }
}

impl Serialize for PieceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A piece on the board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub position: Hex,
}

impl Piece {
    pub fn new(color: Color, ordinal: u8, position: Hex) -> Self {
        Self {
            id: PieceId::new(color, ordinal),
            color,
            position,
        }
    }
}

/// Fixed starting layout: 14 pieces per color in three staggered rows.
///
/// Black occupies the top edge (rows r = -4..-2), white mirrors it on the
/// bottom. Ordinals run 0..13 per color in row-major order.
pub fn starting_pieces() -> Vec<Piece> {
    // (r, q_min, q_max) per row
    let black_rows: [(i8, i8, i8); 3] = [(-4, 0, 4), (-3, -1, 4), (-2, 0, 2)];
    let white_rows: [(i8, i8, i8); 3] = [(4, -4, 0), (3, -4, 1), (2, -2, 0)];

    let mut pieces = Vec::with_capacity(PIECES_PER_SIDE * 2);
    for (color, rows) in [(Color::Black, black_rows), (Color::White, white_rows)] {
        let mut ordinal = 0;
        for (r, q_min, q_max) in rows {
            for q in q_min..=q_max {
                pieces.push(Piece::new(color, ordinal, Hex::new(q, r)));
                ordinal += 1;
            }
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id_round_trip() {
        let id = PieceId::new(Color::Black, 3);
        assert_eq!(id.to_string(), "black-3");
        assert_eq!("black-3".parse::<PieceId>(), Ok(id));
        assert_eq!(
            "white-12".parse::<PieceId>(),
            Ok(PieceId::new(Color::White, 12))
        );
    }

    #[test]
    fn test_piece_id_rejects_malformed() {
        assert!("red-3".parse::<PieceId>().is_err());
        assert!("black3".parse::<PieceId>().is_err());
        assert!("black-".parse::<PieceId>().is_err());
        assert!("black-+3".parse::<PieceId>().is_err());
        assert!("black-300".parse::<PieceId>().is_err());
        assert!("".parse::<PieceId>().is_err());
    }

    #[test]
    fn test_starting_layout() {
        let pieces = starting_pieces();
        assert_eq!(pieces.len(), PIECES_PER_SIDE * 2);

        // Every piece on board, no duplicate positions or ids
        for (i, piece) in pieces.iter().enumerate() {
            assert!(piece.position.is_on_board(), "{} off board", piece.id);
            assert_eq!(piece.id.color, piece.color);
            for other in &pieces[i + 1..] {
                assert_ne!(piece.position, other.position);
                assert_ne!(piece.id, other.id);
            }
        }

        // Black on top, white on bottom
        assert!(pieces
            .iter()
            .filter(|p| p.color == Color::Black)
            .all(|p| p.position.r <= -2));
        assert!(pieces
            .iter()
            .filter(|p| p.color == Color::White)
            .all(|p| p.position.r >= 2));
    }

    #[test]
    fn test_piece_serde() {
        let piece = Piece::new(Color::White, 7, Hex::new(-1, 2));
        let json = serde_json::to_string(&piece).unwrap();
        assert!(json.contains("\"white-7\""));
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(back, piece);
    }
}
