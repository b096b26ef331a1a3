mod common;

use commander_chess::board::{DropSource, LastMove};
use commander_chess::color::{Color, MovableColor};
use commander_chess::controller::{Premove, Selection, UserDropResult, UserMoveResult};
use commander_chess::error::MoveError;
use commander_chess::event::Notification;
use commander_chess::layout;
use commander_chess::piece::{Piece, Role};
use common::*;
use pretty_assertions::assert_eq;


#[test]
fn opening_sequence() {
    let mut ctrl = controller("start", Color::Blue, MovableColor::Both);
    assert!(ctrl.board().piece(sq!(6-11)).is(piece!(Blue Commander)));
    let start = layout::write(ctrl.board().grid());

    // Nothing to move.
    assert_eq!(ctrl.board_mut().apply_move(sq!(0-6), sq!(0-5)), Err(MoveError::PieceMissing));
    assert_eq!(layout::write(ctrl.board().grid()), start);
    assert_eq!(ctrl.board().turn_color(), Color::Blue);
    assert!(ctrl.board_mut().drain_notifications().is_empty());

    // Plain move.
    let outcome = ctrl.board_mut().apply_move(sq!(2-7), sq!(2-6)).unwrap();
    assert_eq!(outcome.captured, None);
    assert_eq!(ctrl.board().turn_color(), Color::Red);
    assert_eq!(ctrl.board().last_move(), Some(LastMove::Move { from: sq!(2-7), to: sq!(2-6) }));
    assert_eq!(ctrl.board().last_move().unwrap().squares(), vec![sq!(2-7), sq!(2-6)]);

    ctrl.board_mut().apply_move(sq!(2-4), sq!(2-5)).unwrap();
    assert_eq!(ctrl.board().turn_color(), Color::Blue);

    // Blue infantry boards the blue tank: one composite, blue still to move.
    let outcome = ctrl.board_mut().apply_move(sq!(10-7), sq!(7-8)).unwrap();
    assert!(outcome.combined);
    assert_eq!(ctrl.board().turn_color(), Color::Blue);
    assert!(ctrl.board().piece(sq!(10-7)).is_none());
    let tank = ctrl.board().piece(sq!(7-8)).unwrap();
    assert!(Some(tank).is(piece!(Blue Tank)));
    assert_eq!(tank.carrying.len(), 1);
    assert!(tank.carrying.first().is(piece!(Blue Infantry)));
    ctrl.board_mut().drain_notifications();

    // The local user plays red; it is blue's turn, so a red move becomes a premove.
    ctrl.board_mut().movable_mut().color = MovableColor::Only(Color::Red);
    let before = layout::write(ctrl.board().grid());
    ctrl.select_square(sq!(2-5), false);
    assert_eq!(ctrl.selection(), Selection::Selected(sq!(2-5)));
    ctrl.select_square(sq!(2-6), false);
    assert_eq!(ctrl.premove(), Some(Premove { orig: sq!(2-5), dest: sq!(2-6) }));
    assert_eq!(ctrl.selection(), Selection::Idle);
    assert_eq!(layout::write(ctrl.board().grid()), before);
    assert_eq!(ctrl.board().turn_color(), Color::Blue);

    // Dropping onto an occupied square without force: predrops are disabled, so the pending
    // premove is cleared and the board stays as it was.
    let engineer = Piece::new(Role::Engineer, Color::Red, sq!(0-0));
    let result = ctrl.drop_new_piece(DropSource::Reserve(engineer), sq!(6-11), false);
    assert_eq!(result, UserDropResult::Rejected(MoveError::WrongTurnOrder));
    assert_eq!(ctrl.premove(), None);
    assert_eq!(ctrl.predrop(), None);
    assert_eq!(layout::write(ctrl.board().grid()), before);

    let notifications = ctrl.board_mut().drain_notifications();
    assert_eq!(notifications.last(), Some(&Notification::PremoveUnset));
}

#[test]
fn capture_through_clicks() {
    let mut ctrl = controller("start", Color::Red, MovableColor::Only(Color::Red));
    ctrl.select_square(sq!(2-4), false);
    ctrl.board_mut().drain_notifications();
    // Free movement: the engine does not know how far infantry may go.
    let result = ctrl.user_move(sq!(2-4), sq!(2-7));
    let UserMoveResult::Moved(outcome) = result else {
        panic!("unexpected result: {result:?}");
    };
    assert!(outcome.captured.as_ref().is(piece!(Blue Infantry)));
    assert!(ctrl.board().piece(sq!(2-7)).is(piece!(Red Infantry)));
    assert_eq!(layout::count_units(ctrl.board().grid(), Color::Blue), 16);
    let notifications = ctrl.board_mut().drain_notifications();
    assert!(matches!(
        &notifications[0],
        Notification::Move { captured: Some(p), .. } if p.role == Role::Infantry
    ));
    assert_eq!(notifications[1], Notification::Change);
}
