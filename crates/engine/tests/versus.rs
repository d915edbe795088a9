use stadium_core::{ActivePiece, Board, Cell, Move, Piece, Rotation};
use stadium_engine::{
    collides, generate_placements, sonic_drop, AttackConfig, Game, Outcome, Side, VersusGame,
};

fn fill_rows_except(board: &mut Board, rows: std::ops::Range<usize>, holes: &[usize]) {
    for y in rows {
        for x in 0..Board::WIDTH {
            if !holes.contains(&x) {
                board.set(x, y, true);
            }
        }
    }
}

fn drop_current(game: &VersusGame, side: Side, x: i8) -> Move {
    let g = game.game(side);
    let piece = ActivePiece::new(g.current().kind, Rotation::North, x, 19);
    Move::from(sonic_drop(g.board(), &piece))
}

#[test]
fn i_piece_into_nine_tenths_row_clears_it() {
    let mut board = Board::new();
    fill_rows_except(&mut board, 0..1, &[9]);
    board.set(0, 1, true);

    let piece = sonic_drop(&board, &ActivePiece::new(Piece::I, Rotation::East, 9, 19));
    assert_eq!((piece.x, piece.y), (9, 2));
    assert!(!collides(&board, &piece));

    board.set_piece(&piece);
    assert_eq!(board.clear_lines(), 1);
    // the marker above the cleared row fell into it
    assert_eq!(board.cell(0, 0), Cell::Garbage);
    assert!(board.is_row_empty(3));
    for y in 0..3 {
        assert_eq!(board.cell(9, y), Cell::Piece(Piece::I));
    }
}

#[test]
fn fresh_match_first_tick() {
    let mut game = VersusGame::new(AttackConfig::standard(), Some(11));
    for side in Side::BOTH {
        let mv = drop_current(&game, side, 4);
        game.set_move(side, Some(mv));
    }
    let tick = game.play_moves();

    assert!(tick.advanced);
    assert_eq!(game.turn(), 1);
    assert_eq!(tick.outcome, Outcome::Playing);
    for side in Side::BOTH {
        assert_eq!(game.game(side).meter(), 0);
        assert_eq!(game.game(side).queue().len(), 5);
        assert!(!game.report(side).accepts_garbage);
    }
}

#[test]
fn quad_pushes_garbage_onto_idle_opponent() {
    let mut attacker = Board::new();
    fill_rows_except(&mut attacker, 0..4, &[0]);
    attacker.set(5, 4, true);
    let games = [
        Game::new(Some(21)).with_board(attacker),
        Game::new(Some(22)),
    ];
    let mut game = VersusGame::from_games(games, AttackConfig::standard());

    game.set_move(Side::One, Some(Move::new(Piece::I, Rotation::East, 0, 2)));
    let mv = drop_current(&game, Side::Two, 4);
    game.set_move(Side::Two, Some(mv));
    let tick = game.play_moves();

    let one = tick.reports[0];
    let two = tick.reports[1];
    assert_eq!(one.lines_cleared, 4);
    assert!(!one.perfect_clear);
    assert_eq!(one.attack, 4);
    assert_eq!(two.damage_received, 4);
    assert!(two.accepts_garbage);
    assert!(!one.accepts_garbage);

    let defender = game.game(Side::Two);
    assert_eq!(defender.meter(), 0);
    for y in 0..4 {
        assert_eq!(defender.board().row(y).count_ones(), 9);
        assert_eq!(defender.board().row(y), defender.board().row(0));
    }
    assert_eq!(game.attack_per_piece(Side::One), 4.0);
}

#[test]
fn simultaneous_attacks_cancel() {
    let mut quad = Board::new();
    fill_rows_except(&mut quad, 0..4, &[0]);
    quad.set(5, 4, true);
    let mut double = Board::new();
    fill_rows_except(&mut double, 0..2, &[0, 1]);
    double.set(5, 2, true);
    let games = [
        Game::new(Some(31)).with_board(quad),
        Game::new(Some(32)).with_board(double),
    ];
    let mut game = VersusGame::from_games(games, AttackConfig::standard());

    game.set_move(Side::One, Some(Move::new(Piece::I, Rotation::East, 0, 2)));
    game.set_move(Side::Two, Some(Move::new(Piece::O, Rotation::North, 0, 0)));
    let tick = game.play_moves();

    assert_eq!(tick.reports[0].attack, 4);
    assert_eq!(tick.reports[1].attack, 2);
    assert_eq!(game.game(Side::One).meter(), 0);
    assert_eq!(game.game(Side::Two).meter(), 2);
    // both cleared, so neither took garbage this turn
    assert!(!tick.reports[0].accepts_garbage);
    assert!(!tick.reports[1].accepts_garbage);
}

#[test]
fn meters_never_both_positive() {
    let mut game = VersusGame::new(AttackConfig::tetra_league(), Some(41));
    for _ in 0..60 {
        for side in Side::BOTH {
            let mv = game.legal_moves(side).first().copied();
            game.set_move(side, mv);
        }
        let tick = game.play_moves();
        let m1 = game.game(Side::One).meter();
        let m2 = game.game(Side::Two).meter();
        assert_eq!(m1.min(m2), 0);
        if tick.outcome.is_over() {
            break;
        }
    }
}

#[test]
fn topping_out_alone_loses() {
    let mut tall = Board::new();
    fill_rows_except(&mut tall, 0..19, &[0]);
    let games = [Game::new(Some(51)), Game::new(Some(52)).with_board(tall)];
    let mut game = VersusGame::from_games(games, AttackConfig::standard());

    let mv = drop_current(&game, Side::One, 4);
    game.set_move(Side::One, Some(mv));
    let stuck = Move::from(*game.game(Side::Two).current());
    game.set_move(Side::Two, Some(stuck));
    let tick = game.play_moves();

    assert_eq!(tick.outcome, Outcome::P1Win);
    let loser = game.game(Side::Two);
    assert!(generate_placements(loser.board(), loser.current().kind).is_empty());
}
