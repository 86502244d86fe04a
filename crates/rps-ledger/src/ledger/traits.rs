//! Ledger trait definition.

use super::log::LogEntry;
use super::storage::Storage;
use crate::identity::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

/// Errors raised by the execution environment itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("timestamp {requested} is earlier than the latest block timestamp {latest}")]
    TimestampNotMonotonic { requested: u64, latest: u64 },

    #[error("event could not be encoded for the log: {0}")]
    Encoding(String),
}

/// Implicit inputs of a call, supplied by the ledger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Identity that submitted the call
    pub caller: Address,
    /// Block the call is sealed in
    pub block: u64,
    /// Block timestamp in unix seconds
    pub timestamp: u64,
}

/// Frame handed to contract code for the duration of one call.
///
/// Reads see committed storage overlaid with the call's own writes. Writes
/// stay pending; the ledger applies them together with the emitted events
/// only if the call returns `Ok`.
pub struct Call<'a, K, V, E> {
    context: CallContext,
    storage: &'a Storage<K, V>,
    writes: HashMap<K, V>,
    events: Vec<E>,
}

impl<'a, K: Eq + Hash, V, E> Call<'a, K, V, E> {
    pub fn new(context: CallContext, storage: &'a Storage<K, V>) -> Self {
        Self {
            context,
            storage,
            writes: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn caller(&self) -> Address {
        self.context.caller
    }

    pub fn timestamp(&self) -> u64 {
        self.context.timestamp
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.writes.get(key).or_else(|| self.storage.get(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.writes.contains_key(key) || self.storage.contains_key(key)
    }

    /// Stage a write for `key`
    pub fn insert(&mut self, key: K, value: V) {
        self.writes.insert(key, value);
    }

    /// Queue an event for the log
    pub fn emit(&mut self, event: E) {
        self.events.push(event);
    }

    /// Pending writes and events, in emission order
    pub fn into_parts(self) -> (HashMap<K, V>, Vec<E>) {
        (self.writes, self.events)
    }
}

/// Outcome of a committed call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt<R, E> {
    /// Value returned by the contract code
    pub output: R,
    /// Context the call ran under
    pub context: CallContext,
    /// Events the call appended to the log
    pub events: Vec<E>,
}

/// Trait for the environment hosting a contract
///
/// The ledger guarantees that calls are atomic and fully serialized: no two
/// calls interleave, and a failed call leaves state, log, block height and
/// clock exactly as they were. Implementations can be:
/// - MockLedger for tests and local nodes
/// - An adapter onto a real replicated log
pub trait Ledger: Send + Sync {
    /// Storage key of the contract
    type Key: Eq + Hash;
    /// Record stored under each key
    type Value;
    /// Notification type appended to the log
    type Event: Clone;

    /// Run `call` on behalf of `caller` as one atomic transition
    fn execute<R, Err, F>(&self, caller: Address, call: F) -> Result<Receipt<R, Self::Event>, Err>
    where
        Err: From<LedgerError>,
        F: FnOnce(&mut Call<'_, Self::Key, Self::Value, Self::Event>) -> Result<R, Err>;

    /// Run a read-only query against the committed state
    fn view<R, F>(&self, query: F) -> R
    where
        F: FnOnce(&Storage<Self::Key, Self::Value>) -> R;

    /// Full ordered event history
    fn log(&self) -> Vec<LogEntry<Self::Event>>;
}
