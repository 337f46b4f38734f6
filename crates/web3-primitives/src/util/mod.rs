//! Hex helpers used at the byte/string boundary.
//!
//! All hex produced by the workspace is lowercase with no prefix; a `0x`
//! prefix is a presentation concern left to callers.

use crate::PrimitivesError;

/// Decode a hex string, tolerating a leading `0x` or `0X`.
///
/// # Arguments
/// * `input` - Hex text, optionally prefixed.
///
/// # Returns
/// The decoded bytes, or `InvalidHex` for odd-length input or non-hex characters.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, PrimitivesError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    Ok(hex::decode(stripped)?)
}

/// Encode bytes as lowercase hex with no prefix.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}
