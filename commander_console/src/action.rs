// Replay actions as typed on the command line.

use std::fmt;

use commander_chess::color::Color;
use commander_chess::coord::Square;
use commander_chess::piece::Role;
use strum::IntoEnumIterator;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    // Click on `from`, then on `to`.
    Move { from: Square, to: Square },
    Drop { role: Role, color: Color, to: Square },
    Cancel,
    PlayPremove,
    PlayPredrop,
    Flip,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ActionParseError(String);

impl fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl std::error::Error for ActionParseError {}

fn parse_square(s: &str) -> Result<Square, ActionParseError> {
    s.parse().map_err(|_| ActionParseError(format!("invalid square '{s}'")))
}

// Accepts the full snake_case name ("air_force") or the layout letter ("f").
fn parse_role(s: &str) -> Result<Role, ActionParseError> {
    let by_name = Role::iter().find(|role| role.name() == s.to_ascii_lowercase());
    let by_letter = match s.chars().collect::<Vec<_>>().as_slice() {
        &[ch] => Role::from_layout_char(ch),
        _ => None,
    };
    by_name.or(by_letter).ok_or_else(|| ActionParseError(format!("invalid role '{s}'")))
}

fn parse_color(s: &str) -> Result<Color, ActionParseError> {
    match s.to_ascii_lowercase().as_str() {
        "red" | "r" => Ok(Color::Red),
        "blue" | "b" => Ok(Color::Blue),
        _ => Err(ActionParseError(format!("invalid color '{s}'"))),
    }
}

impl Action {
    pub fn parse(s: &str) -> Result<Self, ActionParseError> {
        let parts = s.split(':').collect::<Vec<_>>();
        match parts.as_slice() {
            ["cancel"] => Ok(Action::Cancel),
            ["premove"] => Ok(Action::PlayPremove),
            ["predrop"] => Ok(Action::PlayPredrop),
            ["flip"] => Ok(Action::Flip),
            ["drop", role, color, to] => Ok(Action::Drop {
                role: parse_role(role)?,
                color: parse_color(color)?,
                to: parse_square(to)?,
            }),
            [from, to] => Ok(Action::Move { from: parse_square(from)?, to: parse_square(to)? }),
            _ => Err(ActionParseError(format!("cannot parse action '{s}'"))),
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sq(file: u8, rank: u8) -> Square { Square::from_zero_based(file, rank) }

    #[test]
    fn parse_actions() {
        assert_eq!(Action::parse("2-4:2-5"), Ok(Action::Move { from: sq(2, 4), to: sq(2, 5) }));
        assert_eq!(
            Action::parse("drop:air_force:blue:10-11"),
            Ok(Action::Drop { role: Role::AirForce, color: Color::Blue, to: sq(10, 11) })
        );
        assert_eq!(
            Action::parse("drop:T:red:0-0"),
            Ok(Action::Drop { role: Role::Tank, color: Color::Red, to: sq(0, 0) })
        );
        assert_eq!(Action::parse("cancel"), Ok(Action::Cancel));
        assert_eq!(Action::parse("flip"), Ok(Action::Flip));
    }

    #[test]
    fn reject_garbage() {
        assert!(Action::parse("").is_err());
        assert!(Action::parse("2-4").is_err());
        assert!(Action::parse("2-4:11-0").is_err());
        assert!(Action::parse("drop:king:red:0-0").is_err());
        assert!(Action::parse("drop:t:green:0-0").is_err());
    }
}
