use serde::{Deserialize, Serialize};

/// Garbage owed to a player, not yet pushed onto their board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageMeter {
    pending: u32,
}

impl GarbageMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.pending
    }

    pub fn add(&mut self, lines: u32) {
        self.pending += lines;
    }

    /// Empty the meter, returning what was owed.
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    /// Offset two meters against each other; afterwards at least one is zero.
    /// Returns the amount removed from each.
    pub fn cancel(&mut self, other: &mut GarbageMeter) -> u32 {
        let cancelled = self.pending.min(other.pending);
        self.pending -= cancelled;
        other.pending -= cancelled;
        cancelled
    }
}
