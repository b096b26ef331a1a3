// Premove destinations. A premove is played later, when the board may look different, so
// only the mover's own geometry is considered: other pieces never block or restrict it.
// Terrain (river, sea) is not modelled.

use itertools::Itertools;

use crate::coord::{NUM_FILES, NUM_RANKS, Square};
use crate::piece::Role;


const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const UNLIMITED: u8 = if NUM_FILES > NUM_RANKS { NUM_FILES } else { NUM_RANKS };


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Reach {
    orthogonal: u8,
    diagonal: u8,
}

fn reach(role: Role) -> Reach {
    let r = |orthogonal, diagonal| Reach { orthogonal, diagonal };
    match role {
        Role::Commander => r(UNLIMITED, 0),
        Role::Infantry | Role::Engineer | Role::AntiAir => r(1, 0),
        Role::Militia => r(1, 1),
        Role::Tank => r(2, 0),
        Role::Missile => r(2, 1),
        Role::Artillery => r(3, 3),
        Role::AirForce | Role::Navy => r(4, 4),
        Role::Headquarter => r(0, 0),
    }
}

fn rays(from: Square, directions: &[(i8, i8)], distance: u8) -> impl Iterator<Item = Square> + '_ {
    directions.iter().flat_map(move |&(d_file, d_rank)| {
        (1..=distance as i8)
            .map(move |k| from.offset(d_file * k, d_rank * k))
            .take_while(Option::is_some)
            .flatten()
    })
}

pub fn premove_dests(role: Role, from: Square) -> Vec<Square> {
    let Reach { orthogonal, diagonal } = reach(role);
    rays(from, &ORTHOGONAL, orthogonal)
        .chain(rays(from, &DIAGONAL, diagonal))
        .sorted()
        .collect()
}
