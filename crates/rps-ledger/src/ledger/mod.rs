//! Execution environment abstraction.

mod log;
mod mock;
mod storage;
mod traits;

pub use log::{verify_chain, LogDigest, LogEntry};
pub use mock::MockLedger;
pub use storage::Storage;
pub use traits::{Call, CallContext, Ledger, LedgerError, Receipt};
