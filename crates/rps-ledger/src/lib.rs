//! RPS Ledger Library
//!
//! Primitives of the execution environment that hosts the game contract:
//! - Opaque participant identities (Address)
//! - The Ledger trait: atomic, serialized calls over keyed storage and an
//!   ordered event history
//! - MockLedger, an in-memory host for tests and local nodes

pub mod identity;
pub mod ledger;

pub use identity::{Address, AddressParseError};
pub use ledger::{
    verify_chain, Call, CallContext, Ledger, LedgerError, LogDigest, LogEntry, MockLedger, Receipt,
    Storage,
};
