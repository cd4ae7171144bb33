//! # LSB Bit Packing and Extraction
//!
//! Hides a framed byte stream in the least significant bit of the R, G and B
//! channels of a [`PixelBuffer`], and reads it back.
//!
//! ## Embedding Order
//!
//! 1. Pixel quads in buffer order
//! 2. Within a quad: R → G → B (alpha is skipped, never read or written)
//! 3. Within a payload byte: MSB first
//!
//! Each bit occupies exactly one channel: `channel = (channel & 0xFE) | bit`.
//!
//! ## Extraction
//!
//! The extractor is a two-state scan. It first assembles the 4-byte length
//! prefix, then exactly that many payload bytes, and stops. Running off the
//! end of the buffer in either state means there is nothing to recover.
//!
//! Both directions are plain in-memory loops and never suspend.

use log::debug;

use super::capacity::available_bits;
use super::framing::{decode_length, LENGTH_PREFIX_LEN};
use super::pixels::{PixelBuffer, CHANNELS_PER_PIXEL, DATA_CHANNELS_PER_PIXEL};
use crate::error::{Result, StegoError};

/// Embed `framed` into the LSBs of `buffer`, in place.
///
/// The caller must have validated capacity first
/// (see [`validate`][super::capacity::validate]); bits that would not fit
/// are silently dropped. Channels after the last written bit, and every
/// alpha channel, keep their original values.
///
/// # Example
/// ```ignore
/// capacity::validate(framed.len(), buffer.channel_count())?;
/// embed_bits(&mut buffer, &framed);
/// ```
pub fn embed_bits(buffer: &mut PixelBuffer, framed: &[u8]) {
    let mut data_index = 0; // Current byte being embedded
    let mut bit_index = 0; // Current bit within the byte (0-7, MSB first)

    'outer: for pixel in buffer.as_bytes_mut().chunks_exact_mut(CHANNELS_PER_PIXEL) {
        for channel in pixel.iter_mut().take(DATA_CHANNELS_PER_PIXEL) {
            if data_index >= framed.len() {
                break 'outer;
            }

            let bit = (framed[data_index] >> (7 - bit_index)) & 1;
            *channel = (*channel & 0xFE) | bit;

            bit_index += 1;
            if bit_index == 8 {
                bit_index = 0;
                data_index += 1;
            }
        }
    }

    debug!("Embedded {} bytes ({} bits)", data_index, data_index * 8);
}

/// Where the extractor is in the framed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractState {
    ReadingLength,
    ReadingPayload { length: usize },
}

/// Recover the encrypted payload embedded by [`embed_bits`].
///
/// # Returns
/// - `Ok(Vec<u8>)`: exactly the number of bytes the length prefix declared
/// - `Err(StegoError::NotFound)`: the buffer ended before the length prefix
///   or the declared payload was complete
///
/// A declared length of zero, or one that cannot fit in the channels left
/// after the prefix, is reported as `NotFound` as soon as it is read.
pub fn extract_framed(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let total_bits = available_bits(buffer.channel_count());

    let mut state = ExtractState::ReadingLength;
    let mut length_bytes = [0u8; LENGTH_PREFIX_LEN];
    let mut payload = Vec::new();
    let mut collected = 0usize;

    let mut current_byte = 0u8;
    let mut bit_index = 0;

    for pixel in buffer.as_bytes().chunks_exact(CHANNELS_PER_PIXEL) {
        for channel in &pixel[..DATA_CHANNELS_PER_PIXEL] {
            current_byte = (current_byte << 1) | (channel & 1);
            bit_index += 1;
            if bit_index < 8 {
                continue;
            }

            let byte = current_byte;
            current_byte = 0;
            bit_index = 0;

            match state {
                ExtractState::ReadingLength => {
                    length_bytes[collected] = byte;
                    collected += 1;
                    if collected < LENGTH_PREFIX_LEN {
                        continue;
                    }

                    let length = decode_length(length_bytes) as usize;
                    let remaining_bits = total_bits - LENGTH_PREFIX_LEN * 8;
                    if length > remaining_bits / 8 {
                        debug!(
                            "Declared length {} exceeds the {} bytes left in the image",
                            length,
                            remaining_bits / 8
                        );
                        return Err(StegoError::NotFound);
                    }

                    // No encoder emits an empty payload: salt, IV and tag alone are 44 bytes.
                    if length == 0 {
                        debug!("Length prefix is zero, nothing embedded");
                        return Err(StegoError::NotFound);
                    }

                    debug!("Length prefix declares {} payload bytes", length);

                    payload.reserve_exact(length);
                    state = ExtractState::ReadingPayload { length };
                }
                ExtractState::ReadingPayload { length } => {
                    payload.push(byte);
                    if payload.len() == length {
                        return Ok(payload);
                    }
                }
            }
        }
    }

    debug!("Pixel data exhausted in state {:?}", state);
    Err(StegoError::NotFound)
}
