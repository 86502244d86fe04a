//! Append-only, hash-chained event log.

use super::traits::CallContext;
use crate::identity::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 link of the log's hash chain
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogDigest([u8; 32]);

impl LogDigest {
    /// Digest the first entry chains from
    pub const GENESIS: LogDigest = LogDigest([0u8; 32]);

    /// Digest of an entry linked to its predecessor.
    ///
    /// Covers `previous || index || block || timestamp || caller || event`,
    /// integers as u64 big-endian.
    pub fn chain(
        previous: &LogDigest,
        index: u64,
        context: &CallContext,
        encoded_event: &[u8],
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(previous.0);
        hasher.update(index.to_be_bytes());
        hasher.update(context.block.to_be_bytes());
        hasher.update(context.timestamp.to_be_bytes());
        hasher.update(context.caller.as_bytes());
        hasher.update(encoded_event);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for LogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for LogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for LogDigest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogDigest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

/// One committed notification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry<E> {
    /// Position in the log, starting at 0
    pub index: u64,
    pub block: u64,
    pub timestamp: u64,
    pub caller: Address,
    pub event: E,
    /// Chain digest covering this entry and every entry before it
    pub digest: LogDigest,
}

impl<E> LogEntry<E> {
    /// Context of the call that emitted this entry
    pub fn context(&self) -> CallContext {
        CallContext {
            caller: self.caller,
            block: self.block,
            timestamp: self.timestamp,
        }
    }
}

/// Recompute the hash chain over `entries` and check every link.
///
/// Entries must be the log from index 0 onward.
pub fn verify_chain<E: Serialize>(entries: &[LogEntry<E>]) -> bool {
    let mut previous = LogDigest::GENESIS;
    for (position, entry) in entries.iter().enumerate() {
        if entry.index != position as u64 {
            return false;
        }
        let encoded = match serde_json::to_vec(&entry.event) {
            Ok(encoded) => encoded,
            Err(_) => return false,
        };
        let expected = LogDigest::chain(&previous, entry.index, &entry.context(), &encoded);
        if expected != entry.digest {
            return false;
        }
        previous = expected;
    }
    true
}
