//! # Length-Prefix Framing
//!
//! ```text
//! [4 bytes: payload length, big-endian u32] [N bytes: encrypted payload]
//! ```
//!
//! No terminator is embedded. The prefix is the only thing telling the
//! extractor where the payload ends, so it must equal the payload length
//! exactly.

use anyhow::anyhow;

use crate::error::{Result, StegoError};

/// Width of the length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Prepend the 4-byte big-endian length of `payload`.
///
/// # Errors
/// - `StegoError::Unexpected` if the payload is longer than `u32::MAX` bytes
pub fn frame(payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        StegoError::Unexpected(anyhow!(
            "payload of {} bytes does not fit a 32-bit length prefix",
            payload.len()
        ))
    })?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Decode the big-endian payload length from the first four extracted bytes.
pub fn decode_length(prefix: [u8; LENGTH_PREFIX_LEN]) -> u32 {
    u32::from_be_bytes(prefix)
}

/// Split a complete framed byte sequence into its payload.
///
/// Returns `None` if `framed` is shorter than the prefix or than the length
/// it declares. Bytes past the declared length are ignored.
pub fn unframe(framed: &[u8]) -> Option<&[u8]> {
    let prefix: [u8; LENGTH_PREFIX_LEN] = framed.get(..LENGTH_PREFIX_LEN)?.try_into().ok()?;
    let length = decode_length(prefix) as usize;
    framed.get(LENGTH_PREFIX_LEN..LENGTH_PREFIX_LEN.checked_add(length)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_prefixes_big_endian_length() {
        let payload = vec![0xAB; 49];
        let framed = frame(&payload).unwrap();

        assert_eq!(framed.len(), 53);
        assert_eq!(&framed[..4], &[0, 0, 0, 49]);
        assert_eq!(&framed[4..], payload.as_slice());
    }

    #[test]
    fn test_decode_length_is_big_endian() {
        assert_eq!(decode_length([0x00, 0x00, 0x01, 0x02]), 258);
        assert_eq!(decode_length([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
    }

    #[test]
    fn test_unframe_returns_declared_bytes_only() {
        let mut framed = frame(b"payload").unwrap();
        framed.extend_from_slice(b"trailing garbage");

        assert_eq!(unframe(&framed), Some(b"payload".as_slice()));
    }

    #[test]
    fn test_unframe_rejects_truncated_input() {
        let framed = frame(b"payload").unwrap();

        assert_eq!(unframe(&framed[..framed.len() - 1]), None);
        assert_eq!(unframe(&framed[..3]), None);
    }

    #[test]
    fn test_empty_payload() {
        let framed = frame(&[]).unwrap();

        assert_eq!(framed, vec![0, 0, 0, 0]);
        assert_eq!(unframe(&framed), Some([].as_slice()));
    }
}
