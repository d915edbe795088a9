//! Command line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use stadium_engine::AttackConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AttackPreset {
    Standard,
    TetraLeague,
}

impl AttackPreset {
    pub fn config(self) -> AttackConfig {
        match self {
            Self::Standard => AttackConfig::standard(),
            Self::TetraLeague => AttackConfig::tetra_league(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "stadium", version, about = "Play two TBP bots against each other")]
pub struct Args {
    /// Executable of the first bot
    pub bot1: PathBuf,

    /// Executable of the second bot
    pub bot2: PathBuf,

    /// Pieces per second; the arena sleeps 1/pps between ticks
    #[arg(value_parser = parse_pps)]
    pub pps: f64,

    /// Write one JSON record per tick to this file
    pub output: Option<PathBuf>,

    /// Stop after this many games
    #[arg(long)]
    pub games: Option<u32>,

    /// How long a bot may take to answer `suggest`
    #[arg(long, default_value_t = 5000)]
    pub suggest_timeout_ms: u64,

    /// Seed the piece bags; side two uses seed + 1
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reject placements that cannot be reached from spawn
    #[arg(long)]
    pub strict: bool,

    #[arg(long, value_enum, default_value_t = AttackPreset::Standard)]
    pub attack: AttackPreset,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_pps(s: &str) -> Result<f64, String> {
    let pps: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !pps.is_finite() || pps <= 0.0 {
        return Err(format!("pps must be positive and finite, got {s}"));
    }
    if Duration::try_from_secs_f64(1.0 / pps).is_err() {
        return Err(format!("pps {s} is too small to pace ticks"));
    }
    Ok(pps)
}
