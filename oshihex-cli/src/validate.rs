//! Validate command - boundary check for snapshot files

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use oshihex_core::StateSnapshot;

#[derive(Args)]
pub struct ValidateArgs {
    /// Snapshot JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let snapshot = StateSnapshot::load(&args.file)
        .with_context(|| format!("failed to read snapshot: {}", args.file.display()))?;

    let game = snapshot.validate().context("snapshot rejected")?;

    tracing::info!(
        pieces = game.board().len(),
        turn = %game.current_turn(),
        "snapshot accepted"
    );
    println!(
        "OK: {} pieces, {} to move, winner: {}",
        game.board().len(),
        game.current_turn(),
        match game.winner() {
            Some(color) => color.to_string(),
            None => "none".to_string(),
        }
    );

    Ok(())
}
