// Defines `BoardController`: the local user's view of a `Board`. It owns everything that only
// exists on this side of the board (selection, pending premove/predrop, the hold timer,
// orientation) and turns gestures into engine calls.
//
// The user is not trusted: no gesture may leave the board in an inconsistent state. Pending
// intents are never replayed on their own; the host calls `play_premove`/`play_predrop` when
// it decides the time has come. Only one premove or one predrop is pending at a time.

use std::time::Duration;

use log::debug;

use crate::board::{Board, DropSource, MoveOutcome};
use crate::color::{Color, MovableColor};
use crate::config::{Config, DraggableConfig, PredroppableConfig, PremovableConfig, SelectableConfig};
use crate::coord::Square;
use crate::error::MoveError;
use crate::event::{MoveMetadata, NewPieceMetadata, Notification, SetPremoveMetadata};
use crate::geometry::{self, Bounds, Pos};
use crate::hold::Hold;
use crate::piece::{Piece, Role};
use crate::premove::premove_dests;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(Square),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Premove {
    pub orig: Square,
    pub dest: Square,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Predrop {
    pub role: Role,
    pub color: Color,
    pub square: Square,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UserMoveResult {
    Moved(MoveOutcome),
    Premoved,
    Rejected(MoveError),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UserDropResult {
    Dropped,
    Predropped,
    Rejected(MoveError),
}

impl Selection {
    pub fn square(self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::Selected(square) => Some(square),
        }
    }
}

impl UserMoveResult {
    // True if the board changed or an intent was recorded.
    pub fn is_success(&self) -> bool { !matches!(self, UserMoveResult::Rejected(_)) }
}

impl UserDropResult {
    pub fn is_success(&self) -> bool { !matches!(self, UserDropResult::Rejected(_)) }
}

#[derive(Clone, Debug)]
pub struct BoardController {
    board: Board,
    orientation: Color,
    selection: Selection,
    premovable: PremovableConfig,
    premove: Option<Premove>,
    // Computed when a premovable piece is selected and custom destinations are not set.
    premove_dests: Option<Vec<Square>>,
    predroppable: PredroppableConfig,
    predrop: Option<Predrop>,
    draggable: DraggableConfig,
    selectable: SelectableConfig,
    hold: Hold,
    ctrl_key: bool,
}

impl BoardController {
    pub fn new(board: Board, config: &Config) -> Self {
        BoardController {
            board,
            orientation: config.orientation,
            selection: Selection::Idle,
            premovable: config.premovable.clone(),
            premove: None,
            premove_dests: None,
            predroppable: config.predroppable,
            predrop: None,
            draggable: config.draggable,
            selectable: config.selectable,
            hold: Hold::default(),
            ctrl_key: false,
        }
    }

    pub fn from_config(config: &Config) -> Self { Self::new(Board::from_config(config), config) }

    pub fn board(&self) -> &Board { &self.board }
    pub fn board_mut(&mut self) -> &mut Board { &mut self.board }
    pub fn orientation(&self) -> Color { self.orientation }
    pub fn red_pov(&self) -> bool { geometry::is_red_pov(self.orientation) }
    pub fn selection(&self) -> Selection { self.selection }
    pub fn selected(&self) -> Option<Square> { self.selection.square() }
    pub fn premove(&self) -> Option<Premove> { self.premove }
    pub fn premove_dests(&self) -> Option<&[Square]> { self.premove_dests.as_deref() }
    pub fn predrop(&self) -> Option<Predrop> { self.predrop }
    pub fn premovable_mut(&mut self) -> &mut PremovableConfig { &mut self.premovable }
    pub fn predroppable_mut(&mut self) -> &mut PredroppableConfig { &mut self.predroppable }
    pub fn draggable_mut(&mut self) -> &mut DraggableConfig { &mut self.draggable }
    pub fn selectable_mut(&mut self) -> &mut SelectableConfig { &mut self.selectable }
    pub fn is_hold_running(&self) -> bool { self.hold.is_running() }

    // Modifier state reported with the next user move or premove.
    pub fn set_ctrl_key(&mut self, pressed: bool) { self.ctrl_key = pressed; }

    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.opponent();
    }

    pub fn key_at(&self, pos: Pos, bounds: &Bounds) -> Option<Square> {
        geometry::key_at_dom_pos(pos, self.red_pov(), bounds)
    }

    pub fn snapped_key_at(&self, pos: Pos, bounds: &Bounds) -> Square {
        geometry::snapped_key_at_dom_pos(pos, self.red_pov(), bounds)
    }

    // Click (or drag start) on `square`. `force` acts as if click-to-move were enabled.
    pub fn select_square(&mut self, square: Square, force: bool) {
        self.board.notify(Notification::Select { square });
        if let Selection::Selected(selected) = self.selection {
            if selected == square && !self.draggable.enabled {
                self.unselect();
                return;
            }
            if (self.selectable.enabled || force)
                && selected != square
                && self.user_move(selected, square).is_success()
            {
                return;
            }
        }
        if !self.is_intent_square(square) {
            self.cancel_intents();
        }
        let can_pick = self.selectable.enabled || self.draggable.enabled;
        if can_pick && (self.board.is_movable(square) || self.is_premovable(square)) {
            self.set_selected(square);
            self.hold.start();
        } else {
            self.unselect();
        }
    }

    pub fn set_selected(&mut self, square: Square) {
        self.selection = Selection::Selected(square);
        self.premove_dests = None;
        if self.premovable.custom_dests.is_none() && self.is_premovable(square) {
            self.premove_dests = self.board.piece(square).map(|p| premove_dests(p.role, square));
        }
    }

    pub fn unselect(&mut self) {
        self.selection = Selection::Idle;
        self.premove_dests = None;
        self.hold.cancel();
    }

    // A piece of the local color while it's the opponent's turn.
    pub fn is_premovable(&self, square: Square) -> bool {
        let Some(piece) = self.board.piece(square) else {
            return false;
        };
        self.premovable.enabled
            && self.board.movable().color == MovableColor::Only(piece.color)
            && self.board.turn_color() != piece.color
    }

    pub fn can_premove(&self, orig: Square, dest: Square) -> bool {
        if orig == dest || !self.is_premovable(orig) {
            return false;
        }
        match &self.premovable.custom_dests {
            Some(custom) => custom.get(&orig).is_some_and(|dests| dests.contains(&dest)),
            None => self
                .board
                .piece(orig)
                .is_some_and(|piece| premove_dests(piece.role, orig).contains(&dest)),
        }
    }

    pub fn can_predrop(&self, piece: &Piece, dest: Square) -> bool {
        let movable = self.board.movable().color;
        let dest_ok = self.board.piece(dest).is_none_or(|occupant| !movable.allows(occupant.color));
        dest_ok
            && self.predroppable.enabled
            && movable == MovableColor::Only(piece.color)
            && self.board.turn_color() != piece.color
    }

    pub fn is_draggable(&self, square: Square) -> bool {
        let Some(piece) = self.board.piece(square) else {
            return false;
        };
        self.draggable.enabled
            && match self.board.movable().color {
                MovableColor::Both => true,
                MovableColor::Only(color) => {
                    color == piece.color
                        && (self.board.turn_color() == piece.color || self.premovable.enabled)
                }
                MovableColor::Nobody => false,
            }
    }

    // Moves now if allowed, otherwise records a premove if that is allowed. Always leaves
    // nothing selected.
    pub fn user_move(&mut self, orig: Square, dest: Square) -> UserMoveResult {
        if let Err(err) = self.board.can_move(orig, dest) {
            let result = if self.can_premove(orig, dest) {
                self.set_premove(orig, dest);
                UserMoveResult::Premoved
            } else {
                debug!("User move {orig} -> {dest} rejected: {err}");
                UserMoveResult::Rejected(err)
            };
            self.unselect();
            return result;
        }
        match self.board.apply_move_unchecked(orig, dest) {
            Ok(outcome) => {
                let hold_time = self.hold.stop();
                self.unselect();
                self.board.notify(Notification::AfterMove {
                    orig,
                    dest,
                    metadata: MoveMetadata {
                        premove: false,
                        ctrl_key: self.ctrl_key,
                        hold_time,
                        captured: outcome.captured.clone(),
                    },
                });
                UserMoveResult::Moved(outcome)
            }
            Err(err) => {
                debug!("User move {orig} -> {dest} failed: {err}");
                self.unselect();
                UserMoveResult::Rejected(err)
            }
        }
    }

    // Places a new piece, or records a predrop if the piece cannot be placed yet. When neither
    // is possible, pending intents are dropped. The board is unchanged on failure.
    pub fn drop_new_piece(
        &mut self, source: DropSource, dest: Square, force: bool,
    ) -> UserDropResult {
        let piece = match &source {
            DropSource::Square(square) => self.board.piece(*square).cloned(),
            DropSource::Reserve(piece) => Some(piece.clone()),
        };
        let Some(piece) = piece else {
            self.cancel_intents();
            self.unselect();
            return UserDropResult::Rejected(MoveError::PieceMissing);
        };
        let origin = match source {
            DropSource::Square(square) => Some(square),
            DropSource::Reserve(_) => None,
        };
        let droppable = force || self.board.can_drop(piece.color, origin, dest).is_ok();
        let result = if droppable {
            match self.board.apply_drop(source, dest, force) {
                Ok(()) => {
                    self.board.notify(Notification::AfterNewPiece {
                        role: piece.role,
                        square: dest,
                        metadata: NewPieceMetadata { premove: false, predrop: false },
                    });
                    UserDropResult::Dropped
                }
                Err(err) => {
                    self.cancel_intents();
                    UserDropResult::Rejected(err)
                }
            }
        } else if self.can_predrop(&piece, dest) {
            self.set_predrop(piece.role, piece.color, dest);
            UserDropResult::Predropped
        } else {
            let err = self.board.can_drop(piece.color, origin, dest).err();
            debug!("Drop of {:?} on {dest} rejected", piece.role);
            self.cancel_intents();
            UserDropResult::Rejected(err.unwrap_or(MoveError::DestinationOccupied))
        };
        self.unselect();
        result
    }

    pub fn set_premove(&mut self, orig: Square, dest: Square) {
        self.unset_predrop();
        debug!("Premove set: {orig} -> {dest}");
        self.premove = Some(Premove { orig, dest });
        self.board.notify(Notification::PremoveSet {
            orig,
            dest,
            metadata: SetPremoveMetadata { ctrl_key: self.ctrl_key },
        });
    }

    pub fn unset_premove(&mut self) {
        if self.premove.take().is_some() {
            self.board.notify(Notification::PremoveUnset);
        }
    }

    pub fn set_predrop(&mut self, role: Role, color: Color, square: Square) {
        self.unset_premove();
        debug!("Predrop set: {role:?} at {square}");
        self.predrop = Some(Predrop { role, color, square });
        self.board.notify(Notification::PredropSet { role, square });
    }

    pub fn unset_predrop(&mut self) {
        if self.predrop.take().is_some() {
            self.board.notify(Notification::PredropUnset);
        }
    }

    // Squares a pending premove or predrop refers to. Selecting any other square drops it.
    fn is_intent_square(&self, square: Square) -> bool {
        self.premove.is_some_and(|p| p.orig == square || p.dest == square)
            || self.predrop.is_some_and(|p| p.square == square)
    }

    fn cancel_intents(&mut self) {
        self.unset_premove();
        self.unset_predrop();
    }

    // Drops the selection together with any pending premove or predrop.
    pub fn cancel_move(&mut self) {
        self.cancel_intents();
        self.unselect();
    }

    // Plays the pending premove if it has become a legal move. The premove is consumed either
    // way.
    pub fn play_premove(&mut self) -> Result<MoveOutcome, MoveError> {
        let Some(Premove { orig, dest }) = self.premove else {
            return Err(MoveError::NotPremovable);
        };
        let result = self.board.apply_move(orig, dest);
        if let Ok(outcome) = &result {
            self.board.notify(Notification::AfterMove {
                orig,
                dest,
                metadata: MoveMetadata {
                    premove: true,
                    ctrl_key: false,
                    hold_time: Duration::ZERO,
                    captured: outcome.captured.clone(),
                },
            });
        }
        self.unset_premove();
        result
    }

    // Plays the pending predrop if the square can take the piece now. The predrop is consumed
    // either way.
    pub fn play_predrop(&mut self) -> Result<(), MoveError> {
        let Some(Predrop { role, color, square }) = self.predrop else {
            return Err(MoveError::NotPremovable);
        };
        let piece = Piece::new(role, color, square);
        let result = self.board.apply_drop(DropSource::Reserve(piece), square, false);
        if result.is_ok() {
            self.board.notify(Notification::AfterNewPiece {
                role,
                square,
                metadata: NewPieceMetadata { premove: false, predrop: true },
            });
        }
        self.unset_predrop();
        result
    }

    // Applies an opponent's move. Pending intents are kept; the selection is dropped if the
    // selected piece can no longer be picked.
    pub fn apply_remote_move(
        &mut self, orig: Square, dest: Square,
    ) -> Result<MoveOutcome, MoveError> {
        let outcome = self.board.apply_move_unchecked(orig, dest)?;
        self.refresh_selection();
        Ok(outcome)
    }

    pub fn apply_remote_drop(&mut self, piece: Piece, dest: Square) -> Result<(), MoveError> {
        self.board.place_new_piece(piece, dest, true)?;
        self.refresh_selection();
        Ok(())
    }

    fn refresh_selection(&mut self) {
        if let Selection::Selected(square) = self.selection {
            if self.board.is_movable(square) || self.is_premovable(square) {
                self.set_selected(square);
            } else {
                self.unselect();
            }
        }
    }
}
