//! Arena for two TBP bots: runs matches on the versus engine, keeps score and
//! writes a record per tick.

pub mod arena;
pub mod cli;
pub mod config;
pub mod record;

pub use arena::{Arena, ArenaError, Phase, Scoreboard};
pub use cli::{Args, AttackPreset};
pub use config::ArenaConfig;
pub use record::{JsonLinesSink, MemorySink, NullSink, PlayerRecord, RecordSink, TickRecord};
