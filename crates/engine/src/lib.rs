//! stadium-engine - SRS rules, placement search, damage and the versus match.
//!
//! Everything here is synchronous and deterministic given a seed.

pub mod attack;
pub mod b2b;
pub mod bag;
pub mod collision;
pub mod combo;
pub mod config;
pub mod game;
pub mod garbage;
pub mod kicks;
pub mod movegen;
pub mod movement;
pub mod versus;

pub use attack::{damage_sent, TetrioStats};
pub use bag::SevenBag;
pub use collision::{can_place, collides, collides_at, hard_drop_y, is_grounded};
pub use config::{AttackConfig, BaseTable};
pub use game::{Game, Placement, QUEUE_SIZE};
pub use garbage::GarbageMeter;
pub use kicks::get_kicks;
pub use movegen::{count_placements, generate_moves_with_hold, generate_placements};
pub use movement::{
    drop_distance, process_movement, sonic_drop, try_rotate, try_shift, Movement, RotationResult,
};
pub use versus::{IllegalMove, Outcome, Side, SideReport, Tick, VersusGame};
