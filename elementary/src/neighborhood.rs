//! Canonical 3-cell neighborhoods.
//!
//! The order of the variants is fixed: index 0 is `111`, index 7 is `000`.
//! Rule numbers are read off a table in this order, so reordering the
//! variants would silently remap every rule.

use crate::grid::State;

/// One of the 8 possible `(left, center, right)` windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Neighborhood {
    N111 = 0,
    N110 = 1,
    N101 = 2,
    N100 = 3,
    N011 = 4,
    N010 = 5,
    N001 = 6,
    N000 = 7,
}

impl Neighborhood {
    /// All neighborhoods in canonical order.
    pub const ALL: [Neighborhood; 8] = [
        Neighborhood::N111,
        Neighborhood::N110,
        Neighborhood::N101,
        Neighborhood::N100,
        Neighborhood::N011,
        Neighborhood::N010,
        Neighborhood::N001,
        Neighborhood::N000,
    ];

    /// Position of this neighborhood in a rule table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Decodes the window back into its `(left, center, right)` states.
    pub fn cells(self) -> (State, State, State) {
        let bits = 7 - self as u8;
        (bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0)
    }
}

/// Encodes a window of three states into its canonical neighborhood.
pub fn encode(left: State, center: State, right: State) -> Neighborhood {
    match (left, center, right) {
        (true, true, true)    => Neighborhood::N111,
        (true, true, false)   => Neighborhood::N110,
        (true, false, true)   => Neighborhood::N101,
        (true, false, false)  => Neighborhood::N100,
        (false, true, true)   => Neighborhood::N011,
        (false, true, false)  => Neighborhood::N010,
        (false, false, true)  => Neighborhood::N001,
        (false, false, false) => Neighborhood::N000,
    }
}
