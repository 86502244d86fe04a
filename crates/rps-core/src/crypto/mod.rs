//! Cryptographic primitives for the commit-reveal scheme.
//!
//! This module provides:
//! - GameId derivation from creation time and creator
//! - Secret and Commitment for hiding a move until both players commit

mod commitment;
mod game_id;
mod hex_bytes;

pub use commitment::{Commitment, Secret, SecretError};
pub use game_id::GameId;
pub use hex_bytes::HexBytesError;
