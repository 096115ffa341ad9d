//! Play command - CPU vs CPU self play

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use oshihex_core::{Color, CpuPlayer, Difficulty, Game, GameMode, Hex, PIECES_PER_SIDE};

#[derive(Args)]
pub struct PlayArgs {
    /// Game mode
    #[arg(long, value_enum, default_value = "wrestle")]
    pub mode: ModeArg,

    /// Black difficulty
    #[arg(long, value_enum, default_value = "normal")]
    pub black: DifficultyArg,

    /// White difficulty
    #[arg(long, value_enum, default_value = "normal")]
    pub white: DifficultyArg,

    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many half-moves
    #[arg(long, default_value = "300")]
    pub max_moves: usize,

    /// Print the board after every move
    #[arg(long)]
    pub show_board: bool,

    /// Emit a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
}

/// clap mirror of the engine's game mode
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    Wrestle,
    Lineup,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> GameMode {
        match mode {
            ModeArg::Wrestle => GameMode::Wrestle,
            ModeArg::Lineup => GameMode::Lineup,
        }
    }
}

/// clap mirror of the engine's difficulty tiers
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(diff: DifficultyArg) -> Difficulty {
        match diff {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Serialize)]
struct PlaySummary {
    seed: u64,
    moves: usize,
    winner: Option<Color>,
    black_pieces_out: u8,
    white_pieces_out: u8,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting self-play game");

    let mut state = Game::new(args.mode.into());
    let mut black = CpuPlayer::with_seed(args.black.into(), seed);
    let mut white = CpuPlayer::with_seed(args.white.into(), seed.wrapping_add(1));

    let mut moves = 0;
    while state.winner().is_none() && moves < args.max_moves {
        let color = state.current_turn();
        let player = match color {
            Color::Black => &mut black,
            Color::White => &mut white,
        };

        let Some(mv) = player.best_move(state.board(), color) else {
            tracing::warn!(%color, "no legal move available");
            break;
        };

        state = match state.apply_push_move(mv.piece, mv.direction) {
            Ok(next) => next,
            Err(err) => {
                tracing::error!(%err, piece = %mv.piece, "engine rejected the chosen move");
                break;
            }
        };
        moves += 1;

        tracing::debug!(
            moved = %mv.piece,
            dq = mv.direction.q,
            dr = mv.direction.r,
            black_out = state.pieces_out(Color::Black),
            white_out = state.pieces_out(Color::White),
            "half-move {moves}"
        );
        if args.show_board {
            println!("after move {moves} ({color}):\n{}", render_board(&state));
        }
    }

    let summary = PlaySummary {
        seed,
        moves,
        winner: state.winner(),
        black_pieces_out: state.pieces_out(Color::Black),
        white_pieces_out: state.pieces_out(Color::White),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        match summary.winner {
            Some(color) => println!("{color} wins after {moves} half-moves"),
            None => println!("no winner after {moves} half-moves"),
        }
        println!(
            "pieces out: black {}/{PIECES_PER_SIDE}, white {}/{PIECES_PER_SIDE}",
            summary.black_pieces_out, summary.white_pieces_out
        );
    }

    Ok(())
}

/// Text rendering of the board, one row per r coordinate
fn render_board(game: &Game) -> String {
    let mut out = String::new();
    for r in -4i8..=4 {
        let q_min = (-4i8).max(-r - 4);
        let q_max = 4i8.min(-r + 4);

        for _ in 0..r.abs() {
            out.push(' ');
        }
        for q in q_min..=q_max {
            let cell = match game.board().piece_at(Hex::new(q, r)) {
                Some(p) if p.color == Color::Black => 'b',
                Some(_) => 'w',
                None => '.',
            };
            out.push(cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
