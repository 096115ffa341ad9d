//! OSHIHEX Core - Game engine and AI
//!
//! This crate provides the core game logic for OSHIHEX, a two-player
//! push-wrestling game on a hexagonal board:
//! - Board geometry (radius-4 hex grid with axial coordinates)
//! - Push resolution with board-edge elimination
//! - Group movement (single steps, in-line advances, broadside shifts)
//! - Win detection for wrestle and line-up modes
//! - CPU opponent with alpha-beta search
//! - Typed validation for externally-received state

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod lineup;
pub mod moves;
pub mod pieces;
pub mod protocol;
pub mod push;

// Re-exports for convenient access
pub use ai::{legal_moves, self_play, CpuPlayer, Difficulty, Move};
pub use board::{board_cells, direction_between, Board, Hex, BOARD_RADIUS, DIRECTIONS};
pub use eval::{evaluate, Weights};
pub use game::{Game, GameMode, MoveError, MAX_SELECTION, PUSH_OUT_TARGET};
pub use lineup::{has_lineup, lineup_winner, LINEUP_RUN};
pub use pieces::{starting_pieces, Color, Piece, PieceId, PIECES_PER_SIDE};
pub use protocol::{RoomId, StateError, StateSnapshot, MAX_PIECES};
pub use push::{apply_push, push_directions, push_targets, resolve_push, PushResult};
