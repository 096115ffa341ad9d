//! Typed boundary for externally-received state
//!
//! Anything that crosses a transport arrives as a `StateSnapshot` and must
//! pass `validate()` before the engine sees it; the engine assumes every
//! `Game` built here honors its invariants. The outbound direction is a
//! plain conversion. Room identifiers are opaque to the engine and only
//! checked for shape.

use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::Difficulty;
use crate::board::{Board, Hex};
use crate::game::{Game, GameMode};
use crate::pieces::{Color, Piece, PieceId, PIECES_PER_SIDE};

/// Largest piece collection a snapshot may carry
pub const MAX_PIECES: usize = PIECES_PER_SIDE * 2;

/// Longest allowed room identifier
pub const MAX_ROOM_ID_LEN: usize = 6;

// ============================================================================
// STATE SNAPSHOT
// ============================================================================

/// Why a snapshot was rejected at the boundary
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("too many pieces: {0} (limit {MAX_PIECES})")]
    TooManyPieces(usize),
    #[error("piece id {0:?} is not of the form black-N / white-N")]
    BadPieceId(String),
    #[error("piece {0} declares a color inconsistent with its id")]
    ColorMismatch(String),
    #[error("piece {0} sits off the board at ({1}, {2})")]
    OffBoard(String, i8, i8),
    #[error("two pieces share the cell ({0}, {1})")]
    DuplicatePosition(i8, i8),
    #[error("elimination counter {0} outside 0..={PIECES_PER_SIDE}")]
    BadCounter(u8),
    #[error("selected piece id {0:?} is malformed")]
    BadSelection(String),
}

/// Wire mirror of the full game state, camelCase per the transport protocol
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub pieces: Vec<PieceData>,
    pub current_turn: Color,
    pub black_pieces_out: u8,
    pub white_pieces_out: u8,
    pub game_mode: GameMode,
    pub difficulty: Difficulty,
    pub winner: Option<Color>,
    #[serde(default)]
    pub selected_piece_ids: Vec<String>,
}

/// Wire form of one piece; the id is kept as a raw string until validated
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PieceData {
    pub id: String,
    pub color: Color,
    pub position: Hex,
}

impl StateSnapshot {
    /// Validate the snapshot and build an engine state.
    ///
    /// Enforces the full collaborator contract: piece count, id shape and
    /// color consistency, board membership, position uniqueness, counter
    /// range. Enumerated fields (turn, mode, difficulty, winner) are already
    /// constrained by deserialization.
    pub fn validate(&self) -> Result<Game, StateError> {
        if self.pieces.len() > MAX_PIECES {
            return Err(StateError::TooManyPieces(self.pieces.len()));
        }

        let mut seen = FxHashSet::default();
        let mut pieces = Vec::with_capacity(self.pieces.len());
        for data in &self.pieces {
            let id = PieceId::from_str(&data.id)
                .map_err(|_| StateError::BadPieceId(data.id.clone()))?;
            if id.color != data.color {
                return Err(StateError::ColorMismatch(data.id.clone()));
            }
            let pos = data.position;
            if !pos.is_on_board() {
                return Err(StateError::OffBoard(data.id.clone(), pos.q, pos.r));
            }
            if !seen.insert(pos) {
                return Err(StateError::DuplicatePosition(pos.q, pos.r));
            }
            pieces.push(Piece {
                id,
                color: data.color,
                position: pos,
            });
        }

        for counter in [self.black_pieces_out, self.white_pieces_out] {
            if counter as usize > PIECES_PER_SIDE {
                return Err(StateError::BadCounter(counter));
            }
        }

        let selected = self
            .selected_piece_ids
            .iter()
            .map(|s| PieceId::from_str(s).map_err(|_| StateError::BadSelection(s.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Game::from_parts(
            Board::new(pieces),
            self.current_turn,
            self.black_pieces_out,
            self.white_pieces_out,
            self.game_mode,
            self.winner,
            selected,
        ))
    }

    /// Snapshot an engine state for the outbound direction
    pub fn from_game(game: &Game, difficulty: Difficulty) -> Self {
        Self {
            pieces: game
                .board()
                .pieces()
                .iter()
                .map(|p| PieceData {
                    id: p.id.to_string(),
                    color: p.color,
                    position: p.position,
                })
                .collect(),
            current_turn: game.current_turn(),
            black_pieces_out: game.pieces_out(Color::Black),
            white_pieces_out: game.pieces_out(Color::White),
            game_mode: game.mode(),
            difficulty,
            winner: game.winner(),
            selected_piece_ids: game.selected().iter().map(|id| id.to_string()).collect(),
        }
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Save a snapshot to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ============================================================================
// ROOM IDENTIFIERS
// ============================================================================

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("room id must be 1-6 characters drawn from A-Z and 0-9")]
pub struct RoomIdError;

/// Opaque room identifier: 1-6 characters, uppercase A-Z and 0-9 only.
/// The engine never interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort cleanup of user input: uppercase, strip everything
    /// outside A-Z / 0-9, truncate. `None` when nothing valid remains.
    pub fn sanitize(input: &str) -> Option<RoomId> {
        let cleaned: String = input
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .take(MAX_ROOM_ID_LEN)
            .collect();
        (!cleaned.is_empty()).then_some(RoomId(cleaned))
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomId {
    type Err = RoomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_ROOM_ID_LEN
            && s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if valid {
            Ok(RoomId(s.to_string()))
        } else {
            Err(RoomIdError)
        }
    }
}

impl TryFrom<String> for RoomId {
    type Error = RoomIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> String {
        id.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::starting_pieces;

    fn fresh_snapshot() -> StateSnapshot {
        StateSnapshot::from_game(&Game::new(GameMode::Wrestle), Difficulty::Normal)
    }

    #[test]
    fn test_round_trip() {
        let snapshot = fresh_snapshot();
        let game = snapshot.validate().unwrap();

        assert_eq!(game.board().pieces(), &starting_pieces()[..]);
        assert_eq!(game.current_turn(), Color::Black);
        assert_eq!(game.mode(), GameMode::Wrestle);
        assert_eq!(game.winner(), None);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"currentTurn\":\"black\""));
        assert!(json.contains("\"gameMode\":\"wrestle\""));
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.validate().unwrap(), game);
    }

    #[test]
    fn test_rejects_too_many_pieces() {
        let mut snapshot = fresh_snapshot();
        snapshot.pieces.push(PieceData {
            id: "black-20".to_string(),
            color: Color::Black,
            position: Hex::new(0, 0),
        });
        assert_eq!(
            snapshot.validate(),
            Err(StateError::TooManyPieces(MAX_PIECES + 1))
        );
    }

    #[test]
    fn test_rejects_bad_and_mismatched_ids() {
        let mut snapshot = fresh_snapshot();
        snapshot.pieces[0].id = "purple-1".to_string();
        assert!(matches!(
            snapshot.validate(),
            Err(StateError::BadPieceId(_))
        ));

        let mut snapshot = fresh_snapshot();
        snapshot.pieces[0].id = "white-0".to_string(); // color says black
        assert!(matches!(
            snapshot.validate(),
            Err(StateError::ColorMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_off_board_and_duplicate_positions() {
        let mut snapshot = fresh_snapshot();
        snapshot.pieces[0].position = Hex::new(5, 0);
        assert!(matches!(snapshot.validate(), Err(StateError::OffBoard(..))));

        let mut snapshot = fresh_snapshot();
        snapshot.pieces[1].position = snapshot.pieces[0].position;
        assert!(matches!(
            snapshot.validate(),
            Err(StateError::DuplicatePosition(..))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_counter() {
        let mut snapshot = fresh_snapshot();
        snapshot.white_pieces_out = 15;
        assert_eq!(snapshot.validate(), Err(StateError::BadCounter(15)));
    }

    #[test]
    fn test_rejects_malformed_selection() {
        let mut snapshot = fresh_snapshot();
        snapshot.selected_piece_ids = vec!["black-0".to_string(), "nope".to_string()];
        assert!(matches!(
            snapshot.validate(),
            Err(StateError::BadSelection(_))
        ));
    }

    #[test]
    fn test_enumerations_guard_the_wire() {
        let json = serde_json::to_string(&fresh_snapshot())
            .unwrap()
            .replace("\"wrestle\"", "\"chess\"");
        assert!(serde_json::from_str::<StateSnapshot>(&json).is_err());
    }

    #[test]
    fn test_room_id_parse() {
        assert!("ABC123".parse::<RoomId>().is_ok());
        assert!("A".parse::<RoomId>().is_ok());
        assert_eq!("".parse::<RoomId>(), Err(RoomIdError));
        assert_eq!("TOOLONG".parse::<RoomId>(), Err(RoomIdError));
        assert_eq!("abc".parse::<RoomId>(), Err(RoomIdError));
        assert_eq!("AB-12".parse::<RoomId>(), Err(RoomIdError));
    }

    #[test]
    fn test_room_id_sanitize() {
        assert_eq!(
            RoomId::sanitize(" ab!c-123xyz "),
            RoomId::sanitize("ABC123XYZ")
        );
        assert_eq!(RoomId::sanitize("abc").unwrap().as_str(), "ABC");
        assert_eq!(RoomId::sanitize("a b c 1 2 3 4").unwrap().as_str(), "ABC123");
        assert_eq!(RoomId::sanitize("!!!"), None);
    }
}
