//! Secret and Commitment for the commit-reveal scheme.

use super::{hex_bytes, GameId};
use crate::games::Move;
use crate::ledger::Address;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use thiserror::Error;

/// Errors from building a secret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("secret label is {0} bytes, at most 31 fit")]
    TooLong(usize),
}

/// Caller-chosen blinding value mixed into a commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(#[serde(with = "hex_bytes")] [u8; 32]);

impl Secret {
    /// Create a new random secret
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Encode a short UTF-8 label, right-padded with zeros.
    ///
    /// At most 31 bytes are accepted so the value stays NUL-terminated, the
    /// same layout `formatBytes32String` produces on the client side.
    pub fn from_label(label: &str) -> Result<Self, SecretError> {
        let raw = label.as_bytes();
        if raw.len() > 31 {
            return Err(SecretError::TooLong(raw.len()));
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
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

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({}..)", hex::encode(&self.0[..4]))
    }
}

/// Commitment = Keccak256(game_id || move || secret || player)
///
/// Field widths are 32, 1, 32 and 20 bytes with no padding between them,
/// which is the packed encoding of `(bytes32, uint8, bytes32, address)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "hex_bytes")] [u8; 32]);

impl Commitment {
    /// Commit `player` to `mv` in `game_id`
    pub fn new(game_id: &GameId, mv: Move, secret: &Secret, player: &Address) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(game_id.as_bytes());
        hasher.update([mv.code()]);
        hasher.update(secret.as_bytes());
        hasher.update(player.as_bytes());
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

    /// Verify that the given reveal reproduces this commitment
    pub fn verify(&self, game_id: &GameId, mv: Move, secret: &Secret, player: &Address) -> bool {
        *self == Self::new(game_id, mv, secret, player)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
