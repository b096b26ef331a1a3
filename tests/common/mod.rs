// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use commander_chess::board::Board;
use commander_chess::color::{Color, MovableColor};
use commander_chess::config::Config;
use commander_chess::controller::BoardController;
use commander_chess::event::NotificationKind;
use commander_chess::grid::Grid;
use commander_chess::piece::{Piece, Role};
use strum::IntoEnumIterator;


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub role: Role,
    pub color: Color,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<&Piece> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.role == matcher.role && piece.color == matcher.color
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($color:ident $role:ident) => {
        common::PieceMatcher {
            color: commander_chess::color::Color::$color,
            role: commander_chess::piece::Role::$role,
        }
    };
}

#[macro_export]
macro_rules! sq {
    ($file:literal - $rank:literal) => {
        commander_chess::coord::Square::from_zero_based($file, $rank)
    };
}


#[allow(dead_code)]
pub fn observed_config(layout: &str, turn_color: Color, movable: MovableColor) -> Config {
    let mut config = Config {
        layout: layout.to_owned(),
        turn_color,
        subscriptions: NotificationKind::iter().collect(),
        ..Config::default()
    };
    config.movable.color = movable;
    config
}

#[allow(dead_code)]
pub fn controller(layout: &str, turn_color: Color, movable: MovableColor) -> BoardController {
    BoardController::from_config(&observed_config(layout, turn_color, movable))
}

#[allow(dead_code)]
pub fn board(layout: &str, turn_color: Color) -> Board {
    Board::from_config(&observed_config(layout, turn_color, MovableColor::Both))
}

// Every unit on the grid, carriers and passengers alike.
#[allow(dead_code)]
pub fn all_units(grid: &Grid) -> Vec<Piece> {
    grid.iter().flat_map(|(_, piece)| piece.flattened()).collect()
}
