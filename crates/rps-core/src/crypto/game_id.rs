//! Game identifier derived from creation time and creator.

use super::hex_bytes::{self, HexBytesError};
use crate::ledger::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique game identifier
///
/// `id = left-pad-to-32-bytes(timestamp + creator-as-integer)`, both read as
/// unsigned big-endian integers. The sum needs at most 161 bits, so it never
/// overflows the 32-byte width.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(#[serde(with = "hex_bytes")] [u8; 32]);

impl GameId {
    /// Derive the id of a game created by `creator` at `timestamp`
    pub fn derive(timestamp: u64, creator: &Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[32 - Address::LEN..].copy_from_slice(creator.as_bytes());

        let mut carry = u128::from(timestamp);
        for byte in bytes.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = u128::from(*byte) + (carry & 0xff);
            *byte = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
        }

        Self(bytes)
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

impl FromStr for GameId {
    type Err = HexBytesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_bytes::parse(s).map(Self)
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId(0x{})", hex::encode(&self.0[24..]))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
