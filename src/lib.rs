//! # Pixel Cipher
//!
//! Hides a password-protected text message in the least significant bits of
//! an image's R, G and B channels.
//!
//! ## Embedded Format
//!
//! ```text
//! [4 bytes ] payload length (big-endian u32)
//! [16 bytes] PBKDF2-HMAC-SHA256 salt (100,000 iterations)
//! [12 bytes] AES-256-GCM IV
//! [N bytes ] ciphertext + 16-byte tag
//! ```
//!
//! One bit per channel, MSB first, R → G → B per pixel, alpha untouched.
//!
//! ## Modules
//!
//! - [`crypto`]: key derivation, AEAD and the encrypted payload container
//! - [`processing`]: pixel buffer, framing, capacity, bit packing/extraction
//! - [`stego`]: synchronous conceal/reveal over a pixel buffer
//! - [`pipeline`]: async staged pipeline with image I/O
//! - [`image_io`]: image decoding and lossless PNG output

pub mod common;
pub mod crypto;
pub mod error;
pub mod image_io;
pub mod pipeline;
pub mod processing;
pub mod stego;

pub use error::StegoError;
pub use pipeline::{DecodeRequest, EncodeRequest, Pipeline};
pub use processing::PixelBuffer;
pub use stego::{conceal, reveal, DecodeOutcome};
