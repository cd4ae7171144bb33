//! # Key Derivation
//!
//! PBKDF2-HMAC-SHA256 turns a password and a 16-byte salt into the 256-bit
//! AES key. The derivation is deterministic so the decoder, which recovers
//! the salt from the embedded payload, reproduces the encode-time key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 round count. Part of the wire contract, never configurable.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the symmetric key for `password` under `salt`.
///
/// An empty password is accepted; rejecting it is the job of request
/// validation, not of the primitive.
///
/// # Example
/// ```ignore
/// let key = derive_key("test123", &salt);
/// assert_eq!(key.len(), KEY_LEN);
/// ```
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, key.as_mut_slice());
    key
}
