// Logical board coordinates. Commander chess pieces stand on line intersections: 11 files
// by 12 ranks. The rendered board has one more decorative line around it, which never
// becomes a `Square`.

use std::fmt;
use std::ops;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};


pub const NUM_FILES: u8 = 11;
pub const NUM_RANKS: u8 = 12;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: u8, // 0-based, left to right from red's point of view
    rank: u8, // 0-based, red home rank is 0
}

impl Square {
    pub const fn from_zero_based(file: u8, rank: u8) -> Self {
        assert!(file < NUM_FILES);
        assert!(rank < NUM_RANKS);
        Self { file, rank }
    }
    pub fn new(file: i32, rank: i32) -> Option<Self> {
        let in_bounds = (0..NUM_FILES as i32).contains(&file) && (0..NUM_RANKS as i32).contains(&rank);
        in_bounds.then(|| Self::from_zero_based(file as u8, rank as u8))
    }

    pub const fn file(self) -> u8 { self.file }
    pub const fn rank(self) -> u8 { self.rank }

    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::new(self.file as i32 + d_file as i32, self.rank as i32 + d_rank as i32)
    }

    // All squares, rank-major from red's home rank.
    pub fn all() -> impl Iterator<Item = Square> + Clone {
        (0..NUM_RANKS)
            .cartesian_product(0..NUM_FILES)
            .map(|(rank, file)| Square::from_zero_based(file, rank))
    }
}

impl ops::Sub for Square {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output {
        (self.file as i8 - other.file as i8, self.rank as i8 - other.rank as i8)
    }
}

// Text form is "file-rank", e.g. "6-11". This is also the map key form in configs.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.file, self.rank)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}-{})", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, rank) = s
            .trim()
            .split('-')
            .collect_tuple()
            .ok_or_else(|| format!("invalid square: {s}"))?;
        let file = file.parse::<i32>().map_err(|_| format!("invalid file: {file}"))?;
        let rank = rank.parse::<i32>().map_err(|_| format!("invalid rank: {rank}"))?;
        Square::new(file, rank).ok_or_else(|| format!("square out of board: {s}"))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        let sq = Square::from_zero_based(6, 11);
        assert_eq!(sq.to_string(), "6-11");
        assert_eq!("6-11".parse::<Square>(), Ok(sq));
        assert!("11-0".parse::<Square>().is_err());
        assert!("0-12".parse::<Square>().is_err());
        assert!("a-1".parse::<Square>().is_err());
        assert!("3".parse::<Square>().is_err());
    }

    #[test]
    fn all_squares_are_distinct() {
        let all = Square::all().collect_vec();
        assert_eq!(all.len(), NUM_FILES as usize * NUM_RANKS as usize);
        assert!(all.iter().all_unique());
    }

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::from_zero_based(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::from_zero_based(1, 1)));
        assert_eq!(Square::from_zero_based(10, 11).offset(1, 0), None);
        assert_eq!(Square::from_zero_based(4, 2) - corner, (4, 2));
    }
}
