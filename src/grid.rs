// Piece registry: which piece stands on which square. No rules are enforced here; legality
// belongs to `Board`.

use std::{fmt, ops};

use ndarray::{Array, Array2};

use crate::coord::{NUM_FILES, NUM_RANKS, Square};
use crate::piece::Piece;


#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    data: Array2<Option<Piece>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_RANKS as usize, NUM_FILES as usize), None),
        }
    }

    pub fn get(&self, square: Square) -> Option<&Piece> { self[square].as_ref() }
    pub fn has(&self, square: Square) -> bool { self[square].is_some() }

    // Returns the piece previously on the square, if any.
    pub fn set(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self[square].replace(piece)
    }
    pub fn delete(&mut self, square: Square) -> Option<Piece> { self[square].take() }

    pub fn iter(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn len(&self) -> usize { self.data.iter().filter(|p| p.is_some()).count() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn find(&self, mut pred: impl FnMut(&Piece) -> bool) -> Option<Square> {
        self.iter().find(|(_, piece)| pred(piece)).map(|(square, _)| square)
    }
}

impl ops::Index<Square> for Grid {
    type Output = Option<Piece>;
    fn index(&self, square: Square) -> &Self::Output { &self.data[square_to_index(square)] }
}

impl ops::IndexMut<Square> for Grid {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.data[square_to_index(square)]
    }
}

// `Square` is always in bounds, so indexing cannot fail.
fn square_to_index(square: Square) -> [usize; 2] {
    [square.rank() as usize, square.file() as usize]
}

fn debug_format_piece(piece: &Piece) -> String {
    let mut s = format!("{:?}-{:?}", piece.color, piece.role);
    for passenger in &piece.carrying {
        s.push_str(&format!("+{:?}", passenger.role));
    }
    s
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.iter().map(|(square, piece)| (square.to_string(), debug_format_piece(piece))))
            .finish()
    }
}
