//! # Password-Based Authenticated Encryption
//!
//! - [`kdf`]: PBKDF2-HMAC-SHA256 password → 256-bit key
//! - [`cipher`]: AES-256-GCM encrypt / verify-and-decrypt
//! - [`payload`]: the `salt ∥ iv ∥ ciphertext` container that gets embedded

pub mod cipher;
pub mod kdf;
pub mod payload;

pub use payload::{EncryptedPayload, PAYLOAD_OVERHEAD};
