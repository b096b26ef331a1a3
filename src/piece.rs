use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

use crate::color::Color;
use crate::coord::Square;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, IntoStaticStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Commander,
    Infantry,
    Tank,
    Militia,
    Engineer,
    Artillery,
    AntiAir,
    Missile,
    AirForce,
    Navy,
    Headquarter,
}

// A unit on the board. A composite unit carries other units of the same color; carried
// units never carry anything themselves.
#[derive(Clone, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Piece {
    pub role: Role,
    pub color: Color,
    pub position: Square,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carrying: Vec<Piece>,
}

impl Role {
    // Letter used in layout strings. Case encodes color: upper is red, lower is blue.
    pub fn to_layout_char(self) -> char {
        match self {
            Role::Commander => 'c',
            Role::Infantry => 'i',
            Role::Tank => 't',
            Role::Militia => 'd',
            Role::Engineer => 'e',
            Role::Artillery => 'a',
            Role::AntiAir => 'g',
            Role::Missile => 'm',
            Role::AirForce => 'f',
            Role::Navy => 'n',
            Role::Headquarter => 'h',
        }
    }

    pub fn from_layout_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'c' => Some(Role::Commander),
            'i' => Some(Role::Infantry),
            't' => Some(Role::Tank),
            'd' => Some(Role::Militia),
            'e' => Some(Role::Engineer),
            'a' => Some(Role::Artillery),
            'g' => Some(Role::AntiAir),
            'm' => Some(Role::Missile),
            'f' => Some(Role::AirForce),
            'n' => Some(Role::Navy),
            'h' => Some(Role::Headquarter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str { self.into() }
}

pub fn piece_to_layout_char(role: Role, color: Color) -> char {
    let ch = role.to_layout_char();
    match color {
        Color::Red => ch.to_ascii_uppercase(),
        Color::Blue => ch,
    }
}

pub fn piece_from_layout_char(ch: char) -> Option<(Role, Color)> {
    let role = Role::from_layout_char(ch)?;
    let color = if ch.is_ascii_uppercase() { Color::Red } else { Color::Blue };
    Some((role, color))
}

impl Piece {
    pub fn is_composite(&self) -> bool { !self.carrying.is_empty() }

    // Nesting depth of the carrying tree: 0 for a plain unit, 1 for a regular composite.
    // Anything above 1 is a broken invariant.
    pub fn depth(&self) -> usize {
        self.carrying.iter().map(|p| p.depth() + 1).max().unwrap_or(0)
    }

    // Number of units on the square, the carrier included.
    pub fn unit_count(&self) -> usize {
        1 + self.carrying.iter().map(Piece::unit_count).sum::<usize>()
    }

    // Splits the unit into itself (with nothing carried) followed by everything it carries,
    // recursively flattened.
    pub fn flattened(&self) -> Vec<Piece> {
        let mut units = vec![Piece { carrying: Vec::new(), ..self.clone() }];
        for passenger in &self.carrying {
            units.extend(passenger.flattened());
        }
        units
    }

    // Moves the unit and all its passengers to `square`.
    pub fn placed_at(mut self, square: Square) -> Self {
        self.position = square;
        self.carrying = self.carrying.into_iter().map(|p| p.placed_at(square)).collect();
        self
    }
}
