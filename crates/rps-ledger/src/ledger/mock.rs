//! In-memory ledger for tests and local nodes.

use super::log::{LogDigest, LogEntry};
use super::storage::Storage;
use super::traits::{Call, CallContext, Ledger, LedgerError, Receipt};
use crate::identity::Address;
use serde::Serialize;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Committed chain of blocks held by the mock
struct MockLedgerInner<K, V, E> {
    storage: Storage<K, V>,
    log: Vec<LogEntry<E>>,
    /// Height of the latest sealed block (0 before the first call)
    block: u64,
    latest_timestamp: u64,
    /// Timestamp pinned for the next successful call
    next_timestamp: Option<u64>,
}

impl<K, V, E> MockLedgerInner<K, V, E> {
    fn pending_timestamp(&self) -> u64 {
        self.next_timestamp
            .unwrap_or_else(|| wall_clock().max(self.latest_timestamp))
    }

    fn head_digest(&self) -> LogDigest {
        self.log
            .last()
            .map(|entry| entry.digest)
            .unwrap_or(LogDigest::GENESIS)
    }
}

impl<K, V, E: Clone + Serialize> MockLedgerInner<K, V, E> {
    /// Build the log entries for a call without touching the log
    fn seal(&self, context: &CallContext, events: &[E]) -> Result<Vec<LogEntry<E>>, LedgerError> {
        let mut previous = self.head_digest();
        let mut index = self.log.len() as u64;
        let mut entries = Vec::with_capacity(events.len());

        for event in events {
            let encoded =
                serde_json::to_vec(event).map_err(|e| LedgerError::Encoding(e.to_string()))?;
            let digest = LogDigest::chain(&previous, index, context, &encoded);
            entries.push(LogEntry {
                index,
                block: context.block,
                timestamp: context.timestamp,
                caller: context.caller,
                event: event.clone(),
                digest,
            });
            previous = digest;
            index += 1;
        }

        Ok(entries)
    }
}

fn wall_clock() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// In-memory ledger
///
/// Every call runs under one mutex, so calls are serialized. A call only
/// stages writes; a failed call drops them without touching storage.
pub struct MockLedger<K, V, E> {
    inner: Arc<Mutex<MockLedgerInner<K, V, E>>>,
}

impl<K, V, E> Clone for MockLedger<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, E> Default for MockLedger<K, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> MockLedger<K, V, E> {
    /// Create an empty ledger at height 0
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockLedgerInner {
                storage: Storage::default(),
                log: Vec::new(),
                block: 0,
                latest_timestamp: 0,
                next_timestamp: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockLedgerInner<K, V, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pin the timestamp of the next successful call
    pub fn set_next_timestamp(&self, timestamp: u64) -> Result<(), LedgerError> {
        let mut inner = self.lock();
        if timestamp < inner.latest_timestamp {
            return Err(LedgerError::TimestampNotMonotonic {
                requested: timestamp,
                latest: inner.latest_timestamp,
            });
        }
        inner.next_timestamp = Some(timestamp);
        Ok(())
    }

    /// Height of the latest sealed block
    pub fn block_number(&self) -> u64 {
        self.lock().block
    }

    /// Timestamp of the latest sealed block
    pub fn latest_timestamp(&self) -> u64 {
        self.lock().latest_timestamp
    }
}

impl<K, V, E> Ledger for MockLedger<K, V, E>
where
    K: Eq + Hash + Send,
    V: Send,
    E: Clone + Serialize + Send,
{
    type Key = K;
    type Value = V;
    type Event = E;

    fn execute<R, Err, F>(&self, caller: Address, call: F) -> Result<Receipt<R, E>, Err>
    where
        Err: From<LedgerError>,
        F: FnOnce(&mut Call<'_, K, V, E>) -> Result<R, Err>,
    {
        let mut inner = self.lock();
        let context = CallContext {
            caller,
            block: inner.block + 1,
            timestamp: inner.pending_timestamp(),
        };

        let mut frame = Call::new(context, &inner.storage);
        let output = call(&mut frame)?;
        let (writes, events) = frame.into_parts();
        let entries = inner.seal(&context, &events)?;

        inner.storage.apply(writes);
        inner.log.extend(entries);
        inner.block = context.block;
        inner.latest_timestamp = context.timestamp;
        inner.next_timestamp = None;

        trace!(
            block = context.block,
            timestamp = context.timestamp,
            caller = %caller,
            events = events.len(),
            "sealed call"
        );

        Ok(Receipt {
            output,
            context,
            events,
        })
    }

    fn view<R, F>(&self, query: F) -> R
    where
        F: FnOnce(&Storage<K, V>) -> R,
    {
        query(&self.lock().storage)
    }

    fn log(&self) -> Vec<LogEntry<E>> {
        self.lock().log.clone()
    }
}
