//! Participant identities.

mod address;

pub use address::{Address, AddressParseError};
