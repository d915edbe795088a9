use std::time::Duration;

use stadium_engine::AttackConfig;

use crate::cli::Args;

/// Everything the arena needs besides the two bots and the record sink.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Ticks per second.
    pub pps: f64,
    pub suggest_timeout: Duration,
    /// Stop after this many games; `None` plays forever.
    pub games: Option<u32>,
    pub seed: Option<u64>,
    pub strict: bool,
    pub attack: AttackConfig,
}

impl ArenaConfig {
    /// Pause between ticks; rates too slow to represent wait `Duration::MAX`.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.pps).unwrap_or(Duration::MAX)
    }

    /// Seed for match `match_id`. Each match takes two consecutive seeds.
    pub fn match_seed(&self, match_id: u64) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_add(match_id.wrapping_mul(2)))
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            pps: 1.0,
            suggest_timeout: Duration::from_millis(5000),
            games: None,
            seed: None,
            strict: false,
            attack: AttackConfig::default(),
        }
    }
}

impl From<&Args> for ArenaConfig {
    fn from(args: &Args) -> Self {
        Self {
            pps: args.pps,
            suggest_timeout: Duration::from_millis(args.suggest_timeout_ms),
            games: args.games,
            seed: args.seed,
            strict: args.strict,
            attack: args.attack.config(),
        }
    }
}
