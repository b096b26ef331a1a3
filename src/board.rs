// Move/drop engine: the only place where the grid and the turn color change. Legality here is
// limited to occupancy, color and turn order (plus the optional destination allow-list); the
// actual unit movement rules are up to the host.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::color::{Color, MovableColor};
use crate::combination::CombinationRules;
use crate::config::{Config, MovableConfig};
use crate::coord::Square;
use crate::error::MoveError;
use crate::event::{Notification, NotificationQueue};
use crate::grid::Grid;
use crate::internal_error_message;
use crate::layout;
use crate::piece::{Piece, Role};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LastMove {
    Move { from: Square, to: Square },
    Drop { to: Square },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    // The mover boarded a same-color unit. Such a move does not pass the turn.
    pub combined: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DropSource {
    // A piece staged on the board (e.g. being dragged in from a pocket).
    Square(Square),
    // A piece from outside the board.
    Reserve(Piece),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CheckQuery {
    Clear,
    TurnColor,
    Color(Color),
}

impl LastMove {
    pub fn squares(self) -> Vec<Square> {
        match self {
            LastMove::Move { from, to } => vec![from, to],
            LastMove::Drop { to } => vec![to],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    turn_color: Color,
    last_move: Option<LastMove>,
    check: Option<Square>,
    movable: MovableConfig,
    combination: CombinationRules,
    notifications: NotificationQueue,
}

impl Board {
    pub fn new(
        grid: Grid, turn_color: Color, movable: MovableConfig, combination: CombinationRules,
        notifications: NotificationQueue,
    ) -> Self {
        Board {
            grid,
            turn_color,
            last_move: None,
            check: None,
            movable,
            combination,
            notifications,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Board::new(
            layout::read(&config.layout),
            config.turn_color,
            config.movable.clone(),
            config.combination.clone(),
            NotificationQueue::new(config.subscriptions.iter().copied()),
        )
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    // Direct registry access for host-side setup. Nothing is validated or notified.
    pub fn grid_mut(&mut self) -> &mut Grid { &mut self.grid }
    pub fn piece(&self, square: Square) -> Option<&Piece> { self.grid.get(square) }
    pub fn turn_color(&self) -> Color { self.turn_color }
    pub fn last_move(&self) -> Option<LastMove> { self.last_move }
    pub fn check(&self) -> Option<Square> { self.check }
    pub fn movable(&self) -> &MovableConfig { &self.movable }
    pub fn movable_mut(&mut self) -> &mut MovableConfig { &mut self.movable }
    pub fn combination(&self) -> &CombinationRules { &self.combination }
    pub fn combination_mut(&mut self) -> &mut CombinationRules { &mut self.combination }
    pub fn notifications(&self) -> &NotificationQueue { &self.notifications }
    pub fn notifications_mut(&mut self) -> &mut NotificationQueue { &mut self.notifications }
    pub fn drain_notifications(&mut self) -> Vec<Notification> { self.notifications.drain() }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    // Whether the piece on `square` may move right now (not as a premove).
    pub fn is_movable(&self, square: Square) -> bool {
        self.grid.get(square).is_some_and(|piece| self.may_act_now(piece.color))
    }

    fn may_act_now(&self, color: Color) -> bool {
        match self.movable.color {
            MovableColor::Both => true,
            only => only.allows(color) && self.turn_color == color,
        }
    }

    pub fn can_move(&self, from: Square, to: Square) -> Result<(), MoveError> {
        if from == to {
            return Err(MoveError::SameSquare);
        }
        if !self.grid.has(from) {
            return Err(MoveError::PieceMissing);
        }
        if !self.is_movable(from) {
            return Err(MoveError::WrongTurnOrder);
        }
        if !self.movable.free {
            let allowed = self.movable.dests.as_ref().and_then(|dests| dests.get(&from));
            if !allowed.is_some_and(|dests| dests.contains(&to)) {
                return Err(MoveError::DestinationNotAllowed);
            }
        }
        Ok(())
    }

    // Validates and applies a move on behalf of the local user.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        self.can_move(from, to).inspect_err(|err| {
            debug!("Move {from} -> {to} rejected: {err}");
        })?;
        self.apply_move_unchecked(from, to)
    }

    // Applies a move without color, turn or destination checks, e.g. a move that the host
    // received from the opponent. Still refuses to act on nonsense.
    pub fn apply_move_unchecked(
        &mut self, from: Square, to: Square,
    ) -> Result<MoveOutcome, MoveError> {
        let outcome = self.base_move(from, to)?;
        self.movable.dests = None;
        if !outcome.combined {
            self.turn_color = self.turn_color.opponent();
        }
        Ok(outcome)
    }

    // Relocates a piece: capture, combination, bookkeeping and notifications. Does not touch
    // the turn.
    pub fn base_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if from == to {
            return Err(MoveError::SameSquare);
        }
        let Some(mover) = self.grid.get(from).cloned() else {
            return Err(MoveError::PieceMissing);
        };
        if let Some(occupant) = self.grid.get(to).filter(|p| p.color == mover.color) {
            // Boarding a friendly unit. If the pair cannot combine the move is rejected rather
            // than letting the mover overwrite its own piece.
            if !self.combination.can_combine(occupant, &mover) {
                debug!("Cannot combine {:?} into {:?} at {to}", mover.role, occupant.role);
                return Err(MoveError::CombinationForbidden);
            }
            let Some(combined) =
                self.combination.combine_pieces(occupant, std::slice::from_ref(&mover))
            else {
                error!("{}", internal_error_message!("combination of {mover:?} at {to} failed"));
                return Err(MoveError::CombinationForbidden);
            };
            self.grid.delete(from);
            self.grid.set(to, combined);
            self.finish_move(from, to, None);
            return Ok(MoveOutcome { captured: None, combined: true });
        }
        self.grid.delete(from);
        let captured = self.grid.set(to, mover.placed_at(to));
        self.finish_move(from, to, captured.clone());
        Ok(MoveOutcome { captured, combined: false })
    }

    fn finish_move(&mut self, from: Square, to: Square, captured: Option<Piece>) {
        self.last_move = Some(LastMove::Move { from, to });
        self.check = None;
        self.notify(Notification::Move { orig: from, dest: to, captured });
        self.notify(Notification::Change);
    }

    // Whether a piece of `color` taken from `source` may be put on `to` right now.
    pub fn can_drop(
        &self, color: Color, source: Option<Square>, to: Square,
    ) -> Result<(), MoveError> {
        if !self.may_act_now(color) {
            return Err(MoveError::WrongTurnOrder);
        }
        if source != Some(to) && self.grid.has(to) {
            return Err(MoveError::DestinationOccupied);
        }
        Ok(())
    }

    // Puts a new piece on the board. `force` skips the turn check and replaces any occupant.
    pub fn apply_drop(
        &mut self, source: DropSource, to: Square, force: bool,
    ) -> Result<(), MoveError> {
        let (piece, origin) = match source {
            DropSource::Square(square) => {
                (self.grid.get(square).cloned().ok_or(MoveError::PieceMissing)?, Some(square))
            }
            DropSource::Reserve(piece) => (piece, None),
        };
        if !force {
            self.can_drop(piece.color, origin, to).inspect_err(|err| {
                debug!("Drop of {:?} on {to} rejected: {err}", piece.role);
            })?;
        }
        if let Some(origin) = origin {
            self.grid.delete(origin);
        }
        self.place_new_piece(piece, to, force)
    }

    // Places `piece` and passes the turn. Refuses an occupied square unless `force`.
    pub fn place_new_piece(
        &mut self, piece: Piece, to: Square, force: bool,
    ) -> Result<(), MoveError> {
        if self.grid.has(to) {
            if !force {
                return Err(MoveError::DestinationOccupied);
            }
            self.grid.delete(to);
        }
        let piece = piece.placed_at(to);
        self.notify(Notification::DropNewPiece { piece: piece.clone(), square: to });
        self.grid.set(to, piece);
        self.last_move = Some(LastMove::Drop { to });
        self.check = None;
        self.notify(Notification::Change);
        self.movable.dests = None;
        self.turn_color = self.turn_color.opponent();
        Ok(())
    }

    // Marks the commander of the queried color, wherever it stands (carried ones included).
    // This is a highlight for the renderer, not attack detection: the opponent's reach is
    // never looked at.
    pub fn set_check(&mut self, query: CheckQuery) {
        self.check = None;
        let color = match query {
            CheckQuery::Clear => return,
            CheckQuery::TurnColor => self.turn_color,
            CheckQuery::Color(color) => color,
        };
        self.check = self.grid.find(|piece| {
            piece.flattened().iter().any(|unit| unit.role == Role::Commander && unit.color == color)
        });
    }
}
