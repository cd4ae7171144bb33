//! # Capacity Check
//!
//! A carrier with `c` channels (alpha included) holds exactly `0.75 × c`
//! bits: one per R, G and B byte. The comparison is done in integers
//! (`bits × 4 ≤ c × 3`), which is the same bound as `bits ≤ floor(0.75 × c)`.

use log::warn;

use super::framing::LENGTH_PREFIX_LEN;
use crate::crypto::PAYLOAD_OVERHEAD;
use crate::error::{Result, StegoError};

/// Bits embeddable in a buffer of `channel_count` channels.
pub fn available_bits(channel_count: usize) -> usize {
    channel_count / 4 * 3 + (channel_count % 4) * 3 / 4
}

/// Reject when `required_bits` exceeds the buffer's budget.
pub fn check_bits(required_bits: usize, channel_count: usize) -> Result<()> {
    let available = available_bits(channel_count);

    if required_bits > available {
        warn!(
            "⚠️ Capacity exceeded: need {} bits, have {} bits",
            required_bits, available
        );
        return Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits: available,
        });
    }

    Ok(())
}

/// Reject a framed payload of `framed_len` bytes that would not fit.
///
/// Must run before the packer touches the buffer so a rejected encode has
/// no observable effect.
pub fn validate(framed_len: usize, channel_count: usize) -> Result<()> {
    let required_bits = framed_len.checked_mul(8).ok_or(StegoError::CapacityExceeded {
        required_bits: usize::MAX,
        available_bits: available_bits(channel_count),
    })?;

    check_bits(required_bits, channel_count)
}

/// Largest plaintext, in bytes, that still fits once encrypted and framed.
pub fn message_capacity(channel_count: usize) -> usize {
    (available_bits(channel_count) / 8).saturating_sub(LENGTH_PREFIX_LEN + PAYLOAD_OVERHEAD)
}
