//! Two-player match: simultaneous placements, garbage exchange, death.

use serde::{Deserialize, Serialize};
use stadium_core::{Move, Piece};
use thiserror::Error;

use crate::collision::collides;
use crate::config::AttackConfig;
use crate::game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub const fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Playing,
    P1Win,
    P2Win,
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Playing
    }

    /// Outcome when `side` loses on its own.
    pub fn loss_for(side: Side) -> Self {
        match side {
            Side::One => Outcome::P2Win,
            Side::Two => Outcome::P1Win,
        }
    }
}

/// Per-side result of the latest resolved tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideReport {
    pub placed: bool,
    pub attack: u32,
    /// What the opponent sent this tick, before cancelling.
    pub damage_received: u32,
    pub spun: bool,
    pub first_hold: bool,
    pub accepts_garbage: bool,
    pub lines_cleared: u8,
    pub perfect_clear: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// False when both moves were null and nothing happened.
    pub advanced: bool,
    pub turn: u32,
    pub reports: [SideReport; 2],
    pub outcome: Outcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("{got} is neither the current piece nor the hold candidate")]
    WrongPiece { got: Piece },
    #[error("placement overlaps the stack or leaves the board")]
    Collides,
    #[error("placement cannot be reached from spawn")]
    Unreachable,
}

#[derive(Clone, Debug)]
pub struct VersusGame {
    games: [Game; 2],
    pending: [Option<Move>; 2],
    reports: [SideReport; 2],
    total_attack: [u32; 2],
    turn: u32,
    outcome: Outcome,
    config: AttackConfig,
}

impl VersusGame {
    /// Fresh match. With a seed, side one draws from `seed` and side two from
    /// `seed + 1`; without one both sides seed from the OS.
    pub fn new(config: AttackConfig, seed: Option<u64>) -> Self {
        let games = [
            Game::new(seed),
            Game::new(seed.map(|s| s.wrapping_add(1))),
        ];
        Self::from_games(games, config)
    }

    pub fn from_games(games: [Game; 2], config: AttackConfig) -> Self {
        Self {
            games,
            pending: [None; 2],
            reports: [SideReport::default(); 2],
            total_attack: [0; 2],
            turn: 0,
            outcome: Outcome::Playing,
            config,
        }
    }

    pub fn game(&self, side: Side) -> &Game {
        &self.games[side.index()]
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn report(&self, side: Side) -> &SideReport {
        &self.reports[side.index()]
    }

    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    /// Garbage sent per resolved turn.
    pub fn attack_per_piece(&self, side: Side) -> f64 {
        if self.turn == 0 {
            return 0.0;
        }
        f64::from(self.total_attack[side.index()]) / f64::from(self.turn)
    }

    /// Queue a move for the next tick; `None` is a null move.
    pub fn set_move(&mut self, side: Side, mv: Option<Move>) {
        self.pending[side.index()] = mv;
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        self.game(side).legal_moves()
    }

    /// Check a move against the side's piece, hold and board. With `strict`,
    /// the placement must also be reachable from spawn.
    pub fn check_move(&self, side: Side, mv: &Move, strict: bool) -> Result<(), IllegalMove> {
        let game = self.game(side);
        if mv.piece != game.current().kind && Some(mv.piece) != game.hold_candidate() {
            return Err(IllegalMove::WrongPiece { got: mv.piece });
        }
        if collides(game.board(), &mv.to_piece()) {
            return Err(IllegalMove::Collides);
        }
        if strict && !game.legal_moves().iter().any(|legal| legal.same_placement(mv)) {
            return Err(IllegalMove::Unreachable);
        }
        Ok(())
    }

    /// End the match with `side` losing, unless it is already over.
    pub fn forfeit(&mut self, side: Side) {
        if !self.outcome.is_over() {
            self.outcome = Outcome::loss_for(side);
        }
    }

    /// End the match as a draw, unless it is already over.
    pub fn abandon(&mut self) {
        if !self.outcome.is_over() {
            self.outcome = Outcome::Draw;
        }
    }

    /// Resolve both pending moves as one simultaneous tick.
    pub fn play_moves(&mut self) -> Tick {
        let moves = std::mem::take(&mut self.pending);

        if self.outcome.is_over() || moves.iter().all(Option::is_none) {
            return self.tick(false);
        }

        self.turn += 1;
        let mut reports = [SideReport::default(); 2];

        for side in Side::BOTH {
            let Some(mv) = moves[side.index()] else {
                continue;
            };
            let placement = self.games[side.index()].place(&mv, &self.config);
            let report = &mut reports[side.index()];
            report.placed = true;
            report.attack = placement.attack;
            report.spun = placement.spun;
            report.first_hold = placement.first_hold;
            report.lines_cleared = placement.lines;
            report.perfect_clear = placement.perfect_clear;
            self.total_attack[side.index()] += placement.attack;
            self.games[side.other().index()]
                .meter_mut()
                .add(placement.attack);
        }
        for side in Side::BOTH {
            reports[side.index()].damage_received = reports[side.other().index()].attack;
        }

        let [one, two] = &mut self.games;
        one.meter_mut().cancel(two.meter_mut());

        for side in Side::BOTH {
            let report = &mut reports[side.index()];
            if report.placed && report.lines_cleared == 0 {
                report.accepts_garbage = self.games[side.index()].accept_garbage() > 0;
            }
        }

        for side in Side::BOTH {
            if reports[side.index()].placed {
                self.games[side.index()].refill_queue();
            }
        }

        self.reports = reports;
        self.outcome = match (self.games[0].is_dead(), self.games[1].is_dead()) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::P2Win,
            (false, true) => Outcome::P1Win,
            (false, false) => Outcome::Playing,
        };

        self.tick(true)
    }

    fn tick(&self, advanced: bool) -> Tick {
        Tick {
            advanced,
            turn: self.turn,
            reports: self.reports,
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::sonic_drop;
    use stadium_core::{ActivePiece, Board, Piece, Rotation};

    fn current_drop(game: &VersusGame, side: Side, x: i8) -> Move {
        let g = game.game(side);
        let piece = ActivePiece::new(g.current().kind, Rotation::North, x, 19);
        Move::from(sonic_drop(g.board(), &piece))
    }

    #[test]
    fn test_both_null_is_noop() {
        let mut game = VersusGame::new(AttackConfig::standard(), Some(1));
        let tick = game.play_moves();
        assert!(!tick.advanced);
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn test_single_side_move_advances() {
        let mut game = VersusGame::new(AttackConfig::standard(), Some(1));
        let mv = current_drop(&game, Side::Two, 4);
        game.set_move(Side::Two, Some(mv));
        let tick = game.play_moves();
        assert!(tick.advanced);
        assert_eq!(game.turn(), 1);
        assert!(tick.reports[1].placed);
        assert!(!tick.reports[0].placed);
        assert!(!tick.reports[0].accepts_garbage);
    }

    #[test]
    fn test_check_move() {
        let game = VersusGame::new(AttackConfig::standard(), Some(2));
        let g = game.game(Side::One);
        let current = g.current().kind;
        let candidate = g.hold_candidate().unwrap();
        let wrong = Piece::ALL
            .into_iter()
            .find(|p| *p != current && *p != candidate)
            .unwrap();

        let good = current_drop(&game, Side::One, 4);
        assert_eq!(game.check_move(Side::One, &good, true), Ok(()));

        let mut bad = good;
        bad.piece = wrong;
        assert_eq!(
            game.check_move(Side::One, &bad, false),
            Err(IllegalMove::WrongPiece { got: wrong })
        );

        let below = Move::new(current, Rotation::North, 4, -1);
        assert_eq!(
            game.check_move(Side::One, &below, false),
            Err(IllegalMove::Collides)
        );

        let floating = Move::new(current, Rotation::North, 4, 10);
        assert_eq!(game.check_move(Side::One, &floating, false), Ok(()));
        assert_eq!(
            game.check_move(Side::One, &floating, true),
            Err(IllegalMove::Unreachable)
        );
    }

    #[test]
    fn test_forfeit() {
        let mut game = VersusGame::new(AttackConfig::standard(), Some(3));
        game.forfeit(Side::One);
        assert_eq!(game.outcome(), Outcome::P2Win);
        game.forfeit(Side::Two);
        assert_eq!(game.outcome(), Outcome::P2Win);

        let mv = current_drop(&game, Side::Two, 4);
        game.set_move(Side::Two, Some(mv));
        assert!(!game.play_moves().advanced);
    }

    #[test]
    fn test_abandon_is_a_draw_once() {
        let mut game = VersusGame::new(AttackConfig::standard(), Some(3));
        game.abandon();
        assert_eq!(game.outcome(), Outcome::Draw);

        let mut over = VersusGame::new(AttackConfig::standard(), Some(3));
        over.forfeit(Side::Two);
        over.abandon();
        assert_eq!(over.outcome(), Outcome::P1Win);
    }

    #[test]
    fn test_topped_out_sides_draw() {
        let mut full = Board::new();
        for y in 0..19 {
            for x in 0..Board::WIDTH {
                if x != 0 {
                    full.set(x, y, true);
                }
            }
        }
        let games = [
            Game::new(Some(4)).with_board(full.clone()),
            Game::new(Some(5)).with_board(full),
        ];
        let mut game = VersusGame::from_games(games, AttackConfig::standard());
        for side in Side::BOTH {
            let g = game.game(side);
            // spawn row 19 is still open; park the piece right there
            let mv = Move::from(*g.current());
            game.set_move(side, Some(mv));
        }
        let tick = game.play_moves();
        assert_eq!(tick.outcome, Outcome::Draw);
        assert!(game.outcome().is_over());
    }

    #[test]
    fn test_attack_per_piece() {
        let game = VersusGame::new(AttackConfig::standard(), Some(6));
        assert_eq!(game.attack_per_piece(Side::One), 0.0);
    }
}
