use serde::{Deserialize, Serialize};
use stadium_core::SpinType;

/// Base garbage per cleared line count (index 0..=4) for each spin class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTable {
    pub none: [u32; 5],
    pub mini: [u32; 5],
    pub full: [u32; 5],
}

impl BaseTable {
    pub fn get(&self, lines: u8, spin: SpinType) -> u32 {
        let row = match spin {
            SpinType::None => &self.none,
            SpinType::Mini => &self.mini,
            SpinType::Full => &self.full,
        };
        row[usize::from(lines).min(row.len() - 1)]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackConfig {
    pub table: BaseTable,
    pub pc_bonus: u32,
    pub b2b_chaining: bool,
    pub garbage_multiplier: u32,
}

impl AttackConfig {
    pub fn standard() -> Self {
        Self {
            table: BaseTable {
                none: [0, 1, 2, 3, 4],
                mini: [0, 1, 1, 6, 4],
                full: [0, 2, 4, 6, 4],
            },
            pc_bonus: 10,
            b2b_chaining: true,
            garbage_multiplier: 1,
        }
    }

    /// Versus values: singles send nothing and any spin quad sends 10.
    pub fn tetra_league() -> Self {
        Self {
            table: BaseTable {
                none: [0, 0, 1, 2, 4],
                mini: [0, 0, 1, 6, 10],
                full: [0, 2, 4, 6, 10],
            },
            ..Self::standard()
        }
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self::standard()
    }
}
