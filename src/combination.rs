// Which units may carry which. The policy is a plain lookup table so that hosts can inspect
// and adjust it; nothing here hard-codes a role pair outside of `standard()`.

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::piece::{Piece, Role};


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CombinationRules {
    // carriable[base][incoming]: whether `base` may take `incoming` aboard.
    carriable: EnumMap<Role, EnumMap<Role, bool>>,
    // Maximum number of passengers per carrier.
    capacity: EnumMap<Role, u8>,
}

impl CombinationRules {
    // Nothing combines.
    pub fn none() -> Self {
        CombinationRules {
            carriable: enum_map! { _ => enum_map! { _ => false } },
            capacity: enum_map! { _ => 0 },
        }
    }

    pub fn standard() -> Self {
        use Role::*;
        let mut rules = Self::none();
        let table: [(Role, u8, &[Role]); 5] = [
            (Navy, 2, &[AirForce, Tank, Infantry, Militia, Engineer, Commander]),
            (AirForce, 1, &[Tank, Infantry, Militia, Commander]),
            (Tank, 1, &[Infantry, Militia, Engineer, Commander]),
            (Engineer, 1, &[Artillery, AntiAir, Missile]),
            (Headquarter, 1, &[Commander]),
        ];
        for (base, capacity, passengers) in table {
            rules.set_capacity(base, capacity);
            for &incoming in passengers {
                rules.allow(base, incoming);
            }
        }
        rules
    }

    pub fn allows(&self, base: Role, incoming: Role) -> bool { self.carriable[base][incoming] }
    pub fn capacity(&self, base: Role) -> u8 { self.capacity[base] }

    pub fn allow(&mut self, base: Role, incoming: Role) { self.carriable[base][incoming] = true; }
    pub fn forbid(&mut self, base: Role, incoming: Role) { self.carriable[base][incoming] = false; }
    pub fn set_capacity(&mut self, base: Role, capacity: u8) { self.capacity[base] = capacity; }

    pub fn carriers_of(&self, incoming: Role) -> Vec<Role> {
        Role::iter().filter(|&base| self.allows(base, incoming)).collect_vec()
    }

    // Whether `incoming` (together with everything it carries) may board `base`. Direction
    // matters: `base` is the stationary occupant.
    pub fn can_combine(&self, base: &Piece, incoming: &Piece) -> bool {
        self.check_passengers(base, &incoming.flattened())
    }

    // Builds the composite without touching the inputs. Passengers of incoming pieces are
    // promoted onto `base`, so the result is at most one level deep. Returns `None` if any
    // unit is not allowed aboard or the carrier would overflow.
    pub fn combine_pieces(&self, base: &Piece, incoming: &[Piece]) -> Option<Piece> {
        let units = incoming.iter().flat_map(Piece::flattened).collect_vec();
        if !self.check_passengers(base, &units) {
            return None;
        }
        let mut carrying = base.carrying.iter().flat_map(Piece::flattened).collect_vec();
        carrying.extend(units);
        let combined = Piece { carrying, ..base.clone() };
        Some(combined.placed_at(base.position))
    }

    fn check_passengers(&self, base: &Piece, units: &[Piece]) -> bool {
        let total = base.unit_count() - 1 + units.len();
        !units.is_empty()
            && total <= self.capacity(base.role) as usize
            && units.iter().all(|unit| unit.color == base.color && self.allows(base.role, unit.role))
    }
}

impl Default for CombinationRules {
    fn default() -> Self { Self::standard() }
}
