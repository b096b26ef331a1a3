// Every option the board understands. Missing fields in a serialized config take the values
// from `Config::default()`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::{Color, MovableColor};
use crate::combination::CombinationRules;
use crate::coord::Square;
use crate::event::NotificationKind;


// Allowed destinations per origin square.
pub type Dests = HashMap<Square, Vec<Square>>;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovableConfig {
    // Any destination is fine; otherwise `dests` must list it.
    pub free: bool,
    pub color: MovableColor,
    pub dests: Option<Dests>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PremovableConfig {
    pub enabled: bool,
    // Replaces the built-in premove geometry when present.
    pub custom_dests: Option<Dests>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredroppableConfig {
    pub enabled: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DraggableConfig {
    pub enabled: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectableConfig {
    pub enabled: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Layout string or "start".
    pub layout: String,
    pub orientation: Color,
    pub turn_color: Color,
    pub movable: MovableConfig,
    pub premovable: PremovableConfig,
    pub predroppable: PredroppableConfig,
    pub draggable: DraggableConfig,
    pub selectable: SelectableConfig,
    pub combination: CombinationRules,
    // Notification kinds the host observes. Others are never queued.
    pub subscriptions: Vec<NotificationKind>,
}

impl Default for MovableConfig {
    fn default() -> Self {
        MovableConfig { free: true, color: MovableColor::Both, dests: None }
    }
}

impl Default for PremovableConfig {
    fn default() -> Self { PremovableConfig { enabled: true, custom_dests: None } }
}

impl Default for DraggableConfig {
    fn default() -> Self { DraggableConfig { enabled: true } }
}

impl Default for SelectableConfig {
    fn default() -> Self { SelectableConfig { enabled: true } }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            layout: "start".to_owned(),
            orientation: Color::Red,
            turn_color: Color::Red,
            movable: MovableConfig::default(),
            premovable: PremovableConfig::default(),
            predroppable: PredroppableConfig::default(),
            draggable: DraggableConfig::default(),
            selectable: SelectableConfig::default(),
            combination: CombinationRules::standard(),
            subscriptions: Vec::new(),
        }
    }
}
