//! # Pixel Buffer
//!
//! Raw RGBA carrier data. One exclusive owner per encode or decode call:
//! the packer takes it by `&mut`, the extractor by `&`.

use crate::error::{Result, StegoError};

/// Bytes per pixel quad (R, G, B, A).
pub const CHANNELS_PER_PIXEL: usize = 4;

/// Channels per quad that carry data (R, G, B). Alpha is never touched.
pub const DATA_CHANNELS_PER_PIXEL: usize = 3;

/// An ordered sequence of RGBA byte quads, `width × height × 4` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    /// - `StegoError::Validation` when `data.len() != width × height × 4`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height)?;

        if data.len() != expected {
            return Err(StegoError::validation(format!(
                "pixel data is {} bytes but a {}x{} RGBA image needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self { width, height, data })
    }

    /// A buffer of the given size with every byte set to `fill`.
    ///
    /// # Errors
    /// - `StegoError::Validation` when the dimensions overflow
    pub fn filled(width: u32, height: u32, fill: u8) -> Result<Self> {
        let len = Self::byte_len(width, height)?;
        Self::new(width, height, vec![fill; len])
    }

    fn byte_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL))
            .ok_or_else(|| StegoError::validation("image dimensions overflow"))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total channel count, alpha included.
    pub fn channel_count(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_must_match_dimensions() {
        assert!(PixelBuffer::new(2, 2, vec![0u8; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0u8; 15]),
            Err(StegoError::Validation(_))
        ));
    }

    #[test]
    fn test_channel_count_includes_alpha() {
        let buffer = PixelBuffer::filled(100, 100, 0).unwrap();

        assert_eq!(buffer.channel_count(), 40_000);
    }

    #[test]
    fn test_filled_rejects_overflowing_dimensions() {
        assert!(matches!(
            PixelBuffer::filled(u32::MAX, u32::MAX, 0),
            Err(StegoError::Validation(_))
        ));
    }
}
