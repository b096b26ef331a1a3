use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }
}

// Which side the local user is allowed to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MovableColor {
    Both,
    Only(Color),
    Nobody,
}

impl MovableColor {
    pub fn allows(self, color: Color) -> bool {
        match self {
            MovableColor::Both => true,
            MovableColor::Only(c) => c == color,
            MovableColor::Nobody => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movable_color() {
        assert!(MovableColor::Both.allows(Color::Red));
        assert!(MovableColor::Both.allows(Color::Blue));
        assert!(MovableColor::Only(Color::Blue).allows(Color::Blue));
        assert!(!MovableColor::Only(Color::Blue).allows(Color::Red));
        assert!(!MovableColor::Nobody.allows(Color::Red));
        assert_eq!(Color::Red.opponent().opponent(), Color::Red);
    }
}
