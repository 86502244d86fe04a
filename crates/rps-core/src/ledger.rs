//! Execution environment the contract runs on.
//!
//! Re-exports from rps-ledger so callers need a single dependency.

pub use rps_ledger::{
    verify_chain, Address, AddressParseError, Call, CallContext, Ledger, LedgerError, LogDigest,
    LogEntry, MockLedger, Receipt, Storage,
};
