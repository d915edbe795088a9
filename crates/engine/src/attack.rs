//! Outgoing garbage for one placement.

use serde::{Deserialize, Serialize};
use stadium_core::SpinType;

use crate::b2b::{chaining_bonus, maintains_b2b, BACK_TO_BACK_BONUS};
use crate::combo::{apply_combo_floor, apply_combo_multiplier};
use crate::config::AttackConfig;

/// Running counters a player's damage depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetrioStats {
    pub combo: u32,
    pub b2b: u32,
    pub current_combo_power: u32,
    pub current_b2b_chain_power: u32,
}

/// Garbage sent by a placement that cleared `lines` rows, updating `stats`.
///
/// Every step truncates to whole lines before the next one runs; the
/// perfect-clear bonus is added last, after all truncation.
pub fn damage_sent(
    lines: u8,
    spin: SpinType,
    perfect_clear: bool,
    stats: &mut TetrioStats,
    config: &AttackConfig,
) -> u32 {
    if lines > 0 {
        stats.combo += 1;
        if maintains_b2b(lines, spin) {
            stats.b2b += 1;
        } else {
            stats.b2b = 0;
        }
    } else {
        stats.combo = 0;
        stats.current_combo_power = 0;
    }

    let mut garbage = config.table.get(lines, spin);

    if lines > 0 {
        if stats.b2b > 1 {
            if config.b2b_chaining {
                let bonus = chaining_bonus(stats.b2b);
                garbage += bonus;
                stats.current_b2b_chain_power = stats.current_b2b_chain_power.max(bonus);
            } else {
                garbage += BACK_TO_BACK_BONUS;
            }
        } else {
            stats.current_b2b_chain_power = 0;
        }
    }

    garbage = apply_combo_multiplier(garbage, stats.combo);
    garbage = apply_combo_floor(garbage, stats.combo);

    let total = garbage * config.garbage_multiplier;
    if stats.combo > 2 {
        stats.current_combo_power = stats.current_combo_power.max(total);
    }

    if perfect_clear {
        total + config.pc_bonus
    } else {
        total
    }
}
