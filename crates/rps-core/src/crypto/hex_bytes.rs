//! Serde adapter: 32-byte values as `0x`-prefixed hex strings.

use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// Errors from parsing a 32-byte hex value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexBytesError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
    let text = String::deserialize(d)?;
    parse(&text).map_err(serde::de::Error::custom)
}

pub fn parse(text: &str) -> Result<[u8; 32], HexBytesError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits)?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| HexBytesError::InvalidLength(bytes.len()))
}
