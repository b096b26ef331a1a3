mod common;

use commander_chess::board::DropSource;
use commander_chess::color::{Color, MovableColor};
use commander_chess::combination::CombinationRules;
use commander_chess::coord::Square;
use commander_chess::controller::{BoardController, Selection};
use commander_chess::error::MoveError;
use commander_chess::layout;
use commander_chess::piece::{Piece, Role};
use common::*;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;


#[test]
fn get_after_delete_is_empty() {
    let mut board = board("start", Color::Red);
    for square in Square::all() {
        board.grid_mut().delete(square);
        assert!(board.piece(square).is_none());
        assert!(!board.grid().has(square));
    }
    assert!(board.grid().is_empty());
}

#[test]
fn same_square_move_is_noop() {
    let mut board = board("start", Color::Red);
    let start = layout::write(board.grid());
    for square in Square::all() {
        assert_eq!(board.apply_move(square, square), Err(MoveError::SameSquare));
    }
    assert_eq!(layout::write(board.grid()), start);
    assert_eq!(board.turn_color(), Color::Red);
}

#[test]
fn turn_parity() {
    let mut board = board("start", Color::Red);
    let moves = [
        (sq!(2-4), sq!(2-5)),
        (sq!(2-7), sq!(2-6)),
        (sq!(6-4), sq!(6-5)),
        (sq!(2-8), sq!(3-8)),
        (sq!(2-5), sq!(2-6)),  // capture
        (sq!(10-7), sq!(7-8)), // blue infantry boards the blue tank
        (sq!(5-8), sq!(5-7)),
    ];
    for (from, to) in moves {
        let before = board.turn_color();
        let outcome = board.apply_move(from, to).unwrap();
        let expected = if outcome.combined { before } else { before.opponent() };
        assert_eq!(board.turn_color(), expected, "after {from} -> {to}");
    }
}

// Every same-color move between units on this rank either combines or is rejected. In both
// cases units are conserved and nothing is nested more than one level deep.
#[test]
fn combination_stays_flat() {
    let layout = "11/11/11/11/11/11/11/11/11/11/11/(TI)1(FD)1N1E1A1H";
    let start = board(layout, Color::Red);
    let occupied = start.grid().iter().map(|(square, _)| square).collect_vec();
    let units = all_units(start.grid()).len();
    let mut combined = 0;
    for (&from, &to) in occupied.iter().cartesian_product(occupied.iter()) {
        if from == to {
            continue;
        }
        let mut board = start.clone();
        match board.apply_move(from, to) {
            Ok(outcome) => {
                assert!(outcome.combined);
                assert_eq!(outcome.captured, None);
                combined += 1;
            }
            Err(err) => assert_eq!(err, MoveError::CombinationForbidden),
        }
        assert_eq!(all_units(board.grid()).len(), units);
        for (_, piece) in board.grid().iter() {
            assert!(piece.depth() <= 1, "{piece:?}");
        }
        assert_eq!(board.turn_color(), Color::Red);
    }
    // (TI), (FD) and the engineer onto the navy, the artillery onto the engineer.
    assert_eq!(combined, 4);
}

#[test]
fn combination_direction_matters() {
    let rules = CombinationRules::standard();
    let at = Square::from_zero_based(5, 5);
    for (base, incoming) in Role::iter().cartesian_product(Role::iter()) {
        let base = Piece::new(base, Color::Blue, at);
        let incoming = Piece::new(incoming, Color::Blue, at);
        let combined = rules.combine_pieces(&base, std::slice::from_ref(&incoming));
        assert_eq!(combined.is_some(), rules.can_combine(&base, &incoming));
    }
    let navy = Piece::new(Role::Navy, Color::Blue, at);
    let tank = Piece::new(Role::Tank, Color::Blue, at);
    assert!(rules.can_combine(&navy, &tank));
    assert!(!rules.can_combine(&tank, &navy));
}

#[test]
fn colors_never_mix() {
    let rules = CombinationRules::standard();
    let at = Square::from_zero_based(0, 0);
    for (base, incoming) in Role::iter().cartesian_product(Role::iter()) {
        let base = Piece::new(base, Color::Red, at);
        let incoming = Piece::new(incoming, Color::Blue, at);
        assert!(!rules.can_combine(&base, &incoming));
    }
}

#[test]
fn premove_and_predrop_are_exclusive() {
    let mut config = observed_config("start", Color::Blue, MovableColor::Only(Color::Red));
    config.predroppable.enabled = true;
    let mut ctrl = BoardController::from_config(&config);

    ctrl.select_square(sq!(2-4), false);
    ctrl.select_square(sq!(2-5), false);
    assert!(ctrl.premove().is_some());

    let tank = Piece::new(Role::Tank, Color::Red, sq!(0-0));
    ctrl.drop_new_piece(DropSource::Reserve(tank), sq!(5-5), false);
    assert!(ctrl.premove().is_none());
    assert_eq!(ctrl.predrop().map(|p| p.square), Some(sq!(5-5)));

    ctrl.select_square(sq!(6-4), false);
    ctrl.select_square(sq!(6-5), false);
    assert!(ctrl.premove().is_some());
    assert!(ctrl.predrop().is_none());
}

#[test]
fn cancel_move_resets_intents() {
    let mut ctrl = controller("start", Color::Blue, MovableColor::Only(Color::Red));
    ctrl.cancel_move();
    assert_eq!(ctrl.selection(), Selection::Idle);

    ctrl.select_square(sq!(2-4), false);
    ctrl.select_square(sq!(2-5), false);
    ctrl.select_square(sq!(6-4), false);
    assert_eq!(ctrl.selection(), Selection::Selected(sq!(6-4)));
    ctrl.cancel_move();
    assert_eq!(ctrl.selection(), Selection::Idle);
    assert_eq!(ctrl.premove(), None);
    assert_eq!(ctrl.predrop(), None);
}
