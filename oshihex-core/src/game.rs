//! Game state machine: turns, elimination counters, win detection

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Hex, DIRECTIONS};
use crate::lineup::lineup_winner;
use crate::moves::{apply_group_move, valid_moves};
use crate::pieces::{starting_pieces, Color, Piece, PieceId};
use crate::push::{apply_push, resolve_push};

// ============================================================================
// CONSTANTS AND CORE TYPES
// ============================================================================

/// Eliminations that end a wrestle-mode game
pub const PUSH_OUT_TARGET: u8 = 6;

/// Most pieces an interactive selection may hold
pub const MAX_SELECTION: usize = 3;

/// Win condition variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Eject six opposing pieces
    Wrestle,
    /// Align four own pieces on one axis
    Lineup,
}

/// Why a move was rejected. Rejection is a value, never a panic; the caller
/// keeps using the untouched prior state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,
    #[error("no pieces selected")]
    EmptySelection,
    #[error("no piece with id {0} on the board")]
    UnknownPiece(PieceId),
    #[error("piece {0} does not belong to the side to move")]
    WrongColor(PieceId),
    #[error("target cell ({0}, {1}) is off the board")]
    OffBoard(i8, i8),
    #[error("target cell is not reachable by the selected pieces")]
    Unreachable,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game state (clone to mutate).
///
/// Every transition returns a new `Game`; a rejected move returns an error
/// and the caller's state is untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_turn: Color,
    black_out: u8,
    white_out: u8,
    mode: GameMode,
    winner: Option<Color>,
    selected: Vec<PieceId>,
}

impl Game {
    /// New game from the fixed starting layout
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(starting_pieces()),
            current_turn: Color::Black,
            black_out: 0,
            white_out: 0,
            mode,
            winner: None,
            selected: Vec::new(),
        }
    }

    /// Rebuild from already-validated parts; the protocol boundary is the
    /// only caller.
    pub(crate) fn from_parts(
        board: Board,
        current_turn: Color,
        black_out: u8,
        white_out: u8,
        mode: GameMode,
        winner: Option<Color>,
        selected: Vec<PieceId>,
    ) -> Self {
        Self {
            board,
            current_turn,
            black_out,
            white_out,
            mode,
            winner,
            selected,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Pieces of `color` pushed off the board so far
    pub fn pieces_out(&self, color: Color) -> u8 {
        match color {
            Color::Black => self.black_out,
            Color::White => self.white_out,
        }
    }

    pub fn selected(&self) -> &[PieceId] {
        &self.selected
    }

    // ========================================================================
    // SELECTION (interactive-session state)
    // ========================================================================

    /// Toggle selection of an own piece. Ignored once a winner is set, for
    /// opposing pieces, and beyond the three-piece limit.
    pub fn select(&self, id: PieceId) -> Self {
        let mut next = self.clone();
        if self.winner.is_some() {
            return next;
        }
        if let Some(at) = next.selected.iter().position(|&s| s == id) {
            next.selected.remove(at);
            return next;
        }
        let own = self
            .board
            .piece_by_id(id)
            .is_some_and(|p| p.color == self.current_turn);
        if own && next.selected.len() < MAX_SELECTION {
            next.selected.push(id);
        }
        next
    }

    pub fn clear_selection(&self) -> Self {
        let mut next = self.clone();
        next.selected.clear();
        next
    }

    /// Legal destinations for the current selection
    pub fn valid_moves(&self) -> Vec<Hex> {
        let Ok(selection) = self.resolve_selection(&self.selected) else {
            return Vec::new();
        };
        valid_moves(&selection, &self.board)
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Apply a move for the side to move and return the successor state
    pub fn try_move(&self, selection: &[PieceId], target: Hex) -> Result<Game, MoveError> {
        if self.winner.is_some() {
            return Err(MoveError::GameOver);
        }
        if selection.is_empty() {
            return Err(MoveError::EmptySelection);
        }
        if !target.is_on_board() {
            return Err(MoveError::OffBoard(target.q, target.r));
        }

        let pieces = self.resolve_selection(selection)?;
        let (board, ejected) =
            apply_group_move(&pieces, target, &self.board).ok_or(MoveError::Unreachable)?;

        Ok(self.advance(board, &ejected))
    }

    /// Move using the session selection
    pub fn move_selected(&self, target: Hex) -> Result<Game, MoveError> {
        let selection = self.selected.clone();
        self.try_move(&selection, target)
    }

    /// Apply a CPU-chosen push directly. The push resolver is the authority
    /// here; no target-cell check, so a line may be driven off the edge.
    pub fn apply_push_move(&self, piece: PieceId, direction: Hex) -> Result<Game, MoveError> {
        if self.winner.is_some() {
            return Err(MoveError::GameOver);
        }
        let pusher = self
            .board
            .piece_by_id(piece)
            .ok_or(MoveError::UnknownPiece(piece))?;
        if pusher.color != self.current_turn {
            return Err(MoveError::WrongColor(piece));
        }
        if !DIRECTIONS.contains(&direction) {
            return Err(MoveError::Unreachable);
        }

        let push = resolve_push(pusher, direction, &self.board);
        if !push.feasible {
            return Err(MoveError::Unreachable);
        }
        let (board, ejected) = apply_push(&push, &self.board);
        Ok(self.advance(board, &ejected))
    }

    /// Fresh game in the current mode
    pub fn reset(&self) -> Self {
        Self::new(self.mode)
    }

    /// Fresh game in the given mode
    pub fn set_mode(&self, mode: GameMode) -> Self {
        Self::new(mode)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn resolve_selection(&self, selection: &[PieceId]) -> Result<Vec<Piece>, MoveError> {
        selection
            .iter()
            .map(|&id| {
                let piece = self
                    .board
                    .piece_by_id(id)
                    .ok_or(MoveError::UnknownPiece(id))?;
                if piece.color != self.current_turn {
                    return Err(MoveError::WrongColor(id));
                }
                Ok(piece.clone())
            })
            .collect()
    }

    /// Shared bookkeeping after an accepted move: counters, win check, turn
    /// switch, selection reset.
    fn advance(&self, board: Board, ejected: &[Piece]) -> Game {
        let mut next = self.clone();
        next.board = board;
        for piece in ejected {
            match piece.color {
                Color::Black => next.black_out += 1,
                Color::White => next.white_out += 1,
            }
        }
        next.winner = next.detect_winner();
        next.current_turn = next.current_turn.opponent();
        next.selected.clear();
        next
    }

    fn detect_winner(&self) -> Option<Color> {
        match self.mode {
            GameMode::Wrestle => {
                if self.black_out >= PUSH_OUT_TARGET {
                    Some(Color::White)
                } else if self.white_out >= PUSH_OUT_TARGET {
                    Some(Color::Black)
                } else {
                    None
                }
            }
            GameMode::Lineup => lineup_winner(&self.board),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
