// Mapping between pointer positions and logical squares. Pieces stand on line intersections;
// the rendered board has NUM_FILES + 1 vertical and NUM_RANKS + 1 horizontal spacings, the
// outermost lines being decorative.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::coord::{NUM_FILES, NUM_RANKS, Square};


// Pixel position: (x, y) with y growing downwards.
pub type Pos = (f64, f64);

// Board rectangle in pixels.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn file_width(&self) -> f64 { self.width / (NUM_FILES + 1) as f64 }
    fn rank_height(&self) -> f64 { self.height / (NUM_RANKS + 1) as f64 }
}

// Whether the board is seen from red's side (red at the bottom).
pub fn is_red_pov(orientation: Color) -> bool { orientation == Color::Red }

fn flip_unless_red(file: i32, rank: i32, as_red: bool) -> (i32, i32) {
    if as_red {
        (file, rank)
    } else {
        (NUM_FILES as i32 - 1 - file, NUM_RANKS as i32 - 1 - rank)
    }
}

// Nearest intersection, or `None` if the position falls on the decorative margin or outside.
pub fn key_at_dom_pos(pos: Pos, as_red: bool, bounds: &Bounds) -> Option<Square> {
    let file = ((pos.0 - bounds.left) / bounds.file_width()).round() as i32 - 1;
    let rank = NUM_RANKS as i32 - ((pos.1 - bounds.top) / bounds.rank_height()).round() as i32;
    let (file, rank) = flip_unless_red(file, rank, as_red);
    Square::new(file, rank)
}

pub fn square_center(square: Square, as_red: bool, bounds: &Bounds) -> Pos {
    let (file, rank) = flip_unless_red(square.file() as i32, square.rank() as i32, as_red);
    (
        bounds.left + (file + 1) as f64 * bounds.file_width(),
        bounds.top + (NUM_RANKS as i32 - rank) as f64 * bounds.rank_height(),
    )
}

pub fn distance_sq(a: Pos, b: Pos) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

// Square whose rendered center is closest to `pos`. Never fails: positions far outside the
// board snap to the nearest edge square. On a tie the square scanned last wins.
pub fn snapped_key_at_dom_pos(pos: Pos, as_red: bool, bounds: &Bounds) -> Square {
    let mut best = Square::from_zero_based(0, 0);
    let mut best_distance = f64::INFINITY;
    for square in Square::all() {
        let d = distance_sq(pos, square_center(square, as_red, bounds));
        if d <= best_distance {
            best = square;
            best_distance = d;
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    // 40px between lines in both directions.
    const BOUNDS: Bounds = Bounds { left: 100., top: 50., width: 480., height: 520. };

    fn sq(file: u8, rank: u8) -> Square { Square::from_zero_based(file, rank) }

    #[test]
    fn center_maps_back_to_square() {
        for as_red in [true, false] {
            for square in Square::all() {
                let center = square_center(square, as_red, &BOUNDS);
                assert_eq!(key_at_dom_pos(center, as_red, &BOUNDS), Some(square));
                assert_eq!(snapped_key_at_dom_pos(center, as_red, &BOUNDS), square);
            }
        }
    }

    #[test]
    fn red_perspective_corners() {
        assert_eq!(square_center(sq(0, 0), true, &BOUNDS), (140., 530.));
        assert_eq!(square_center(sq(10, 11), true, &BOUNDS), (540., 90.));
        assert_eq!(square_center(sq(0, 0), false, &BOUNDS), (540., 90.));
    }

    #[test]
    fn margins_are_not_squares() {
        assert_eq!(key_at_dom_pos((100., 300.), true, &BOUNDS), None);
        assert_eq!(key_at_dom_pos((300., 50.), true, &BOUNDS), None);
        assert_eq!(key_at_dom_pos((580., 570.), true, &BOUNDS), None);
        assert_eq!(key_at_dom_pos((-1000., -1000.), false, &BOUNDS), None);
    }

    #[test]
    fn rounding_to_nearest_intersection() {
        assert_eq!(key_at_dom_pos((155., 515.), true, &BOUNDS), Some(sq(0, 0)));
        assert_eq!(key_at_dom_pos((165., 505.), true, &BOUNDS), Some(sq(1, 1)));
    }

    #[test]
    fn snapping_outside_the_board() {
        assert_eq!(snapped_key_at_dom_pos((0., 1000.), true, &BOUNDS), sq(0, 0));
        assert_eq!(snapped_key_at_dom_pos((1000., 0.), true, &BOUNDS), sq(10, 11));
        assert_eq!(snapped_key_at_dom_pos((1000., 0.), false, &BOUNDS), sq(0, 0));
    }

    #[test]
    fn snapping_tie_goes_to_later_square() {
        // Halfway between the centers of 0-0 (140, 530) and 1-0 (180, 530).
        assert_eq!(snapped_key_at_dom_pos((160., 530.), true, &BOUNDS), sq(1, 0));
    }

    #[test]
    fn distance() {
        assert_eq!(distance_sq((0., 0.), (3., 4.)), 25.);
    }
}
