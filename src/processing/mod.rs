//! # Pixel Processing
//!
//! The bit-level half of the system: the carrier buffer, length-prefix
//! framing, the capacity budget, and LSB packing/extraction.

pub mod capacity;
pub mod framing;
pub mod pixels;
pub mod steganography;

// Re-export main functions for convenience
pub use pixels::PixelBuffer;
pub use steganography::{embed_bits, extract_framed};
