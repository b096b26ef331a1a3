// Observer notifications. The core never calls observers directly: every externally visible
// transition is queued, and the host drains the queue whenever it sees fit (`dispatch`).
// Observers must not assume they run before the call that triggered the notification returns,
// nor any ordering relative to core calls made later by the same caller.

use std::collections::VecDeque;
use std::time::Duration;

use enum_map::{Enum, EnumMap, enum_map};
use log::trace;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIter};

use crate::coord::Square;
use crate::piece::{Piece, Role};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SetPremoveMetadata {
    pub ctrl_key: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveMetadata {
    pub premove: bool,
    pub ctrl_key: bool,
    pub hold_time: Duration,
    pub captured: Option<Piece>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NewPieceMetadata {
    pub premove: bool,
    pub predrop: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, EnumDiscriminants, Serialize, Deserialize)]
#[strum_discriminants(name(NotificationKind))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, Enum, EnumIter, Serialize, Deserialize))]
pub enum Notification {
    Select { square: Square },
    Move { orig: Square, dest: Square, captured: Option<Piece> },
    Change,
    DropNewPiece { piece: Piece, square: Square },
    PremoveSet { orig: Square, dest: Square, metadata: SetPremoveMetadata },
    PremoveUnset,
    PredropSet { role: Role, square: Square },
    PredropUnset,
    AfterMove { orig: Square, dest: Square, metadata: MoveMetadata },
    AfterNewPiece { role: Role, square: Square, metadata: NewPieceMetadata },
}

// Notifications of kinds nobody subscribed to are dropped on the spot: a missing observer is
// never an error.
#[derive(Clone, Debug)]
pub struct NotificationQueue {
    subscriptions: EnumMap<NotificationKind, bool>,
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new(subscriptions: impl IntoIterator<Item = NotificationKind>) -> Self {
        let mut queue = NotificationQueue {
            subscriptions: enum_map! { _ => false },
            pending: VecDeque::new(),
        };
        for kind in subscriptions {
            queue.subscribe(kind);
        }
        queue
    }

    pub fn subscribe(&mut self, kind: NotificationKind) { self.subscriptions[kind] = true; }
    pub fn unsubscribe(&mut self, kind: NotificationKind) {
        self.subscriptions[kind] = false;
        self.pending.retain(|n| NotificationKind::from(n) != kind);
    }
    pub fn is_subscribed(&self, kind: NotificationKind) -> bool { self.subscriptions[kind] }

    pub fn push(&mut self, notification: Notification) {
        if self.is_subscribed(NotificationKind::from(&notification)) {
            trace!("Queued notification: {:?}", notification);
            self.pending.push_back(notification);
        }
    }

    pub fn len(&self) -> usize { self.pending.len() }
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    pub fn drain(&mut self) -> Vec<Notification> { self.pending.drain(..).collect() }
}

// Host-side callbacks. Every hook is optional.
pub trait Observer {
    fn on_select(&mut self, _square: Square) {}
    fn on_move(&mut self, _orig: Square, _dest: Square, _captured: Option<&Piece>) {}
    fn on_change(&mut self) {}
    fn on_drop_new_piece(&mut self, _piece: &Piece, _square: Square) {}
    fn on_premove_set(&mut self, _orig: Square, _dest: Square, _metadata: SetPremoveMetadata) {}
    fn on_premove_unset(&mut self) {}
    fn on_predrop_set(&mut self, _role: Role, _square: Square) {}
    fn on_predrop_unset(&mut self) {}
    fn on_after_move(&mut self, _orig: Square, _dest: Square, _metadata: &MoveMetadata) {}
    fn on_after_new_piece(&mut self, _role: Role, _square: Square, _metadata: NewPieceMetadata) {}
}

// Drains the queue into `observer`. Returns the number of notifications delivered.
pub fn dispatch(queue: &mut NotificationQueue, observer: &mut impl Observer) -> usize {
    let notifications = queue.drain();
    let count = notifications.len();
    for notification in notifications {
        use Notification::*;
        match notification {
            Select { square } => observer.on_select(square),
            Move { orig, dest, captured } => observer.on_move(orig, dest, captured.as_ref()),
            Change => observer.on_change(),
            DropNewPiece { piece, square } => observer.on_drop_new_piece(&piece, square),
            PremoveSet { orig, dest, metadata } => observer.on_premove_set(orig, dest, metadata),
            PremoveUnset => observer.on_premove_unset(),
            PredropSet { role, square } => observer.on_predrop_set(role, square),
            PredropUnset => observer.on_predrop_unset(),
            AfterMove { orig, dest, metadata } => observer.on_after_move(orig, dest, &metadata),
            AfterNewPiece { role, square, metadata } => {
                observer.on_after_new_piece(role, square, metadata)
            }
        }
    }
    count
}
