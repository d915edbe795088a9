use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use stadium_core::{Board, Piece};

/// 7-bag randomizer: every kind once per shuffled batch. Also owns the
/// side's garbage-hole RNG so one seed reproduces a whole game.
#[derive(Clone, Debug)]
pub struct SevenBag {
    rng: StdRng,
    pieces: [Piece; 7],
    index: usize,
}

impl SevenBag {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut bag = Self {
            rng,
            pieces: Piece::ALL,
            index: 0,
        };
        bag.refill();
        bag
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    fn refill(&mut self) {
        self.pieces = Piece::ALL;
        self.pieces.shuffle(&mut self.rng);
        self.index = 0;
    }

    pub fn next_piece(&mut self) -> Piece {
        if self.index == self.pieces.len() {
            self.refill();
        }
        let piece = self.pieces[self.index];
        self.index += 1;
        piece
    }

    pub fn peek(&self) -> Option<Piece> {
        self.pieces.get(self.index).copied()
    }

    pub fn remaining(&self) -> &[Piece] {
        &self.pieces[self.index..]
    }

    /// Uniform column for the hole of an incoming garbage batch.
    pub fn hole_column(&mut self) -> usize {
        self.rng.random_range(0..Board::WIDTH)
    }
}
