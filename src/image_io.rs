//! # Image Source and Sink
//!
//! The collaborators that turn encoded image files into a [`PixelBuffer`]
//! and back. Decoding accepts anything the `image` crate can read; the
//! sink always writes PNG.
//!
//! ## Lossless Output
//!
//! Every embedded bit lives in a channel LSB. Any lossy re-encoding (JPEG,
//! lossy WebP, chroma subsampling, palette quantization) destroys them, so
//! an [`ImageSink`] implementation must store RGBA samples bit-exactly.

use anyhow::{anyhow, Context};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::future::Future;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, StegoError};
use crate::processing::PixelBuffer;

/// Supplies RGBA pixel data decoded from an encoded image.
pub trait ImageSource {
    fn load(&self, encoded: Vec<u8>) -> impl Future<Output = Result<PixelBuffer>> + Send;
}

/// Serializes a mutated buffer into a losslessly encoded image.
pub trait ImageSink {
    fn store(&self, buffer: PixelBuffer) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// `image`-crate backed source and PNG sink.
///
/// Decoding and encoding run on the blocking pool.
#[derive(Debug, Clone)]
pub struct PngCodec {
    max_input_bytes: u64,
}

impl PngCodec {
    /// Create a codec that refuses encoded inputs larger than `max_input_bytes`.
    pub fn new(max_input_bytes: u64) -> Self {
        Self { max_input_bytes }
    }
}

impl Default for PngCodec {
    fn default() -> Self {
        Self::new(crate::common::config::DEFAULT_MAX_INPUT_BYTES)
    }
}

impl ImageSource for PngCodec {
    fn load(&self, encoded: Vec<u8>) -> impl Future<Output = Result<PixelBuffer>> + Send {
        let limit = self.max_input_bytes;

        async move {
            if encoded.is_empty() {
                return Err(StegoError::validation("image is empty"));
            }
            if encoded.len() as u64 > limit {
                return Err(StegoError::validation(format!(
                    "image is {} bytes, limit is {} bytes",
                    encoded.len(),
                    limit
                )));
            }

            let rgba = tokio::task::spawn_blocking(move || {
                image::load_from_memory(&encoded)
                    .map(|img| img.to_rgba8())
                    .context("failed to decode image")
            })
            .await
            .context("image decode task panicked")??;

            let (width, height) = rgba.dimensions();
            debug!("Decoded {}x{} image", width, height);
            PixelBuffer::new(width, height, rgba.into_raw())
        }
    }
}

impl ImageSink for PngCodec {
    fn store(&self, buffer: PixelBuffer) -> impl Future<Output = Result<Vec<u8>>> + Send {
        async move {
            let bytes = tokio::task::spawn_blocking(move || encode_png(buffer))
                .await
                .context("PNG encode task panicked")??;

            debug!("Encoded PNG of {} bytes", bytes.len());
            Ok(bytes)
        }
    }
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buffer: PixelBuffer) -> Result<Vec<u8>> {
    let (width, height) = (buffer.width(), buffer.height());
    let img = RgbaImage::from_raw(width, height, buffer.into_raw())
        .ok_or_else(|| anyhow!("pixel data does not match {}x{}", width, height))?;

    let mut output_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .context("failed to encode PNG")?;

    Ok(output_bytes)
}

/// Read an image file from disk.
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(bytes)
}

/// Write encoded image bytes to disk.
pub async fn write_image_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
