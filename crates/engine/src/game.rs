//! One player's side of a match: board, active piece, hold, queue, counters.

use arrayvec::ArrayVec;
use stadium_core::{ActivePiece, Board, GameState, Move, Piece, SpinType};

use crate::attack::{damage_sent, TetrioStats};
use crate::bag::SevenBag;
use crate::collision::collides;
use crate::config::AttackConfig;
use crate::garbage::GarbageMeter;
use crate::movegen::generate_moves_with_hold;

pub const QUEUE_SIZE: usize = 5;

/// What one placement did to the player's own board and counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    /// The hold slot was empty and got filled, consuming an extra queue slot.
    pub first_hold: bool,
    pub lines: u8,
    pub spin: SpinType,
    /// Full spin, or a mini spin that cleared something.
    pub spun: bool,
    pub perfect_clear: bool,
    pub attack: u32,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: ActivePiece,
    hold: Option<Piece>,
    queue: ArrayVec<Piece, QUEUE_SIZE>,
    stats: TetrioStats,
    meter: GarbageMeter,
    bag: SevenBag,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        let mut bag = SevenBag::new(seed);
        let current = ActivePiece::spawn(bag.next_piece());
        let mut game = Self {
            board: Board::new(),
            current,
            hold: None,
            queue: ArrayVec::new(),
            stats: TetrioStats::default(),
            meter: GarbageMeter::new(),
            bag,
        };
        game.refill_queue();
        game
    }

    /// Replace the board, keeping pieces and counters.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &ActivePiece {
        &self.current
    }

    pub fn hold(&self) -> Option<Piece> {
        self.hold
    }

    pub fn queue(&self) -> &[Piece] {
        &self.queue
    }

    pub fn stats(&self) -> &TetrioStats {
        &self.stats
    }

    pub fn meter(&self) -> u32 {
        self.meter.get()
    }

    pub(crate) fn meter_mut(&mut self) -> &mut GarbageMeter {
        &mut self.meter
    }

    /// The piece a hold would bring in: the held piece, or the queue front.
    pub fn hold_candidate(&self) -> Option<Piece> {
        self.hold.or_else(|| self.queue.first().copied())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_moves_with_hold(&self.board, self.current.kind, self.hold, &self.queue)
    }

    /// Lock `mv` onto the board and score it.
    ///
    /// A move whose kind differs from the current piece goes through hold.
    /// The caller is expected to have checked the move; the queue is left
    /// short and must be topped up with [`Game::refill_queue`].
    pub fn place(&mut self, mv: &Move, config: &AttackConfig) -> Placement {
        let mut first_hold = false;
        if mv.piece != self.current.kind {
            if self.hold.is_none() {
                self.queue.pop_at(0);
                first_hold = true;
            }
            self.hold = Some(self.current.kind);
        }

        let piece = mv.to_piece();
        self.board.set_piece(&piece);
        let next = self.draw_from_queue();
        self.current = ActivePiece::spawn(next);

        let lines = self.board.clear_lines();
        let perfect_clear = self.board.is_empty();
        let spin = mv.spin_type;
        let attack = damage_sent(lines, spin, perfect_clear, &mut self.stats, config);

        Placement {
            first_hold,
            lines,
            spin,
            spun: spin == SpinType::Full || (spin == SpinType::Mini && lines > 0),
            perfect_clear,
            attack,
        }
    }

    fn draw_from_queue(&mut self) -> Piece {
        match self.queue.pop_at(0) {
            Some(piece) => piece,
            None => self.bag.next_piece(),
        }
    }

    pub fn refill_queue(&mut self) {
        while !self.queue.is_full() {
            self.queue.push(self.bag.next_piece());
        }
    }

    /// Push everything on the meter onto the board as one batch sharing a
    /// random hole column. Returns the rows added.
    pub fn accept_garbage(&mut self) -> u32 {
        let lines = self.meter.take();
        if lines > 0 {
            let hole = self.bag.hole_column();
            self.board.add_garbage(lines as usize, hole);
        }
        lines
    }

    /// The freshly spawned piece has nowhere to go.
    pub fn is_dead(&self) -> bool {
        collides(&self.board, &self.current)
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            current: self.current,
            hold: self.hold,
            queue: self.queue.to_vec(),
            b2b: self.stats.b2b,
            combo: self.stats.combo,
            garbage_meter: self.meter.get(),
        }
    }
}
