//! Game rules and seat assignment.

mod rps;
mod slot;

pub use rps::{resolve, Move, Outcome};
pub use slot::{Slot, SlotLookup};
