//! Player slots and the admission policy.

use crate::ledger::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed seats of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::First, Slot::Second];

    /// Position in the per-slot arrays
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    /// Get the opponent's slot
    pub fn other(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Where a caller stands relative to a game's seats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotLookup {
    /// Caller already holds this slot
    Bound(Slot),
    /// Caller holds no slot and the second slot is still open
    Vacant,
    /// Both slots are held by other identities
    Rejected,
}

impl SlotLookup {
    /// Map a caller onto the seats of a game.
    ///
    /// The first slot is always bound at creation; the second goes to the
    /// first distinct identity that is admitted.
    pub fn resolve(players: &[Option<Address>; 2], caller: &Address) -> Self {
        match players {
            [Some(first), _] if first == caller => SlotLookup::Bound(Slot::First),
            [_, Some(second)] if second == caller => SlotLookup::Bound(Slot::Second),
            [_, None] => SlotLookup::Vacant,
            [_, Some(_)] => SlotLookup::Rejected,
        }
    }
}
