//! OSHIHEX CLI - Command-line interface
//!
//! Commands:
//! - play: CPU vs CPU self play
//! - validate: check a state snapshot file against the engine contract

mod play;
mod validate;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oshihex")]
#[command(about = "Hexagonal push-wrestling game engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a CPU-vs-CPU game
    Play(play::PlayArgs),
    /// Validate a state snapshot JSON file
    Validate(validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Validate(args) => validate::run(args),
    }
}
