// Layout strings describe piece placement, one rank per '/'-separated group, starting from
// rank 11 (blue's home). Letters are roles (upper case red, lower case blue), digits are runs
// of empty squares, a parenthesized group "(tim)" is a composite: the first unit carries the
// rest. Anything after a space or '[' is ignored.

use itertools::Itertools;
use log::warn;

use crate::color::Color;
use crate::coord::{NUM_FILES, NUM_RANKS, Square};
use crate::error::LayoutError;
use crate::grid::Grid;
use crate::piece::{Piece, piece_from_layout_char, piece_to_layout_char};


pub const INITIAL: &str =
    "6c4/1n2fh1hf2/3a2g2a1/2n1gt1tg2/2i3d3i/11/11/2I3D3I/2N1GT1TG2/3A2G2A1/1N2FH1HF2/6C4";

fn expand_alias(layout: &str) -> &str {
    if layout == "start" { INITIAL } else { layout }
}

// Fail-soft: stops at the first unparsable point and returns whatever was placed so far.
pub fn read(layout: &str) -> Grid {
    let (grid, error) = parse(expand_alias(layout));
    if let Some(error) = error {
        warn!("Layout parsing stopped early ({error}): {layout}");
    }
    grid
}

pub fn read_strict(layout: &str) -> Result<Grid, LayoutError> {
    match parse(expand_alias(layout)) {
        (grid, None) => Ok(grid),
        (_, Some(error)) => Err(error),
    }
}

pub fn write(grid: &Grid) -> String {
    (0..NUM_RANKS)
        .rev()
        .map(|rank| {
            let mut rank_notation = String::new();
            let mut empty_count: u8 = 0;
            for file in 0..NUM_FILES {
                if let Some(piece) = grid.get(Square::from_zero_based(file, rank)) {
                    if empty_count > 0 {
                        rank_notation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    if piece.is_composite() {
                        rank_notation.push('(');
                        for unit in piece.flattened() {
                            rank_notation.push(piece_to_layout_char(unit.role, unit.color));
                        }
                        rank_notation.push(')');
                    } else {
                        rank_notation.push(piece_to_layout_char(piece.role, piece.color));
                    }
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                rank_notation.push_str(&empty_count.to_string());
            }
            rank_notation
        })
        .join("/")
}

struct Cursor {
    rank: u8,
    file: u8,
}

impl Cursor {
    fn square(&self, index: usize) -> Result<Square, LayoutError> {
        if self.file < NUM_FILES {
            Ok(Square::from_zero_based(self.file, self.rank))
        } else {
            Err(LayoutError::RankOverflow { index, rank: self.rank })
        }
    }
}

fn parse(layout: &str) -> (Grid, Option<LayoutError>) {
    let mut grid = Grid::new();
    let error = parse_into(layout, &mut grid).err();
    (grid, error)
}

fn parse_into(layout: &str, grid: &mut Grid) -> Result<(), LayoutError> {
    let mut cursor = Cursor { rank: NUM_RANKS - 1, file: 0 };
    // Units of an open "(...)" group and the index of its opening bracket.
    let mut stack: Option<(usize, Vec<Piece>)> = None;
    let mut chars = layout.chars().enumerate().peekable();
    while let Some((index, ch)) = chars.next() {
        match ch {
            ' ' | '[' => break,
            '/' => {
                if stack.is_some() {
                    return Err(LayoutError::UnbalancedStack { index });
                }
                cursor.rank = cursor.rank.checked_sub(1).ok_or(LayoutError::TooManyRanks { index })?;
                cursor.file = 0;
            }
            '(' => {
                if stack.is_some() {
                    return Err(LayoutError::NestedStack { index });
                }
                stack = Some((index, Vec::new()));
            }
            ')' => {
                let Some((_, units)) = stack.take() else {
                    return Err(LayoutError::UnbalancedStack { index });
                };
                let mut units = units.into_iter();
                let Some(mut carrier) = units.next() else {
                    return Err(LayoutError::UnbalancedStack { index });
                };
                carrier.carrying = units.collect();
                grid.set(carrier.position, carrier);
                cursor.file += 1;
            }
            _ if ch.is_ascii_digit() => {
                let overflow = LayoutError::RankOverflow { index, rank: cursor.rank };
                let mut run = ch.to_digit(10).unwrap_or(0);
                while let Some(d) = chars.peek().and_then(|(_, next)| next.to_digit(10)) {
                    run = run
                        .checked_mul(10)
                        .and_then(|r| r.checked_add(d))
                        .ok_or_else(|| overflow.clone())?;
                    chars.next();
                }
                let file = (cursor.file as u32)
                    .checked_add(run)
                    .filter(|&file| file <= NUM_FILES as u32)
                    .ok_or(overflow)?;
                cursor.file = file as u8;
            }
            _ => {
                let (role, color) =
                    piece_from_layout_char(ch).ok_or(LayoutError::UnknownPiece { index, ch })?;
                let square = cursor.square(index)?;
                let piece = Piece::new(role, color, square);
                match &mut stack {
                    Some((start, units)) => {
                        if units.first().is_some_and(|carrier| carrier.color != color) {
                            return Err(LayoutError::MixedStack { index: *start });
                        }
                        units.push(piece);
                    }
                    None => {
                        grid.set(square, piece);
                        cursor.file += 1;
                    }
                }
            }
        }
    }
    match stack {
        Some((start, _)) => Err(LayoutError::UnbalancedStack { index: start }),
        None => Ok(()),
    }
}

pub fn count_units(grid: &Grid, color: Color) -> usize {
    grid.iter().filter(|(_, p)| p.color == color).map(|(_, p)| p.unit_count()).sum()
}
