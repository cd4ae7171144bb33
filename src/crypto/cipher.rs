//! # Authenticated Cipher
//!
//! AES-256-GCM over a caller-supplied 12-byte IV. The ciphertext carries the
//! 16-byte tag at its end, exactly as the AEAD produces it.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use anyhow::anyhow;

use super::kdf::KEY_LEN;
use crate::error::{Result, StegoError};

/// IV (nonce) length in bytes.
pub const IV_LEN: usize = 12;

/// AEAD tag length in bytes, appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` and `iv`.
///
/// The IV must never repeat for the same key; callers draw it fresh from
/// the OS RNG on every call.
///
/// # Returns
/// - `Ok(Vec<u8>)`: ciphertext followed by the 16-byte tag
/// - `Err(StegoError::Unexpected)`: the primitive refused the input
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| StegoError::Unexpected(anyhow!("AES-256-GCM key setup failed: {}", e)))?;

    cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|_| StegoError::Unexpected(anyhow!("AES-256-GCM encryption failed")))
}

/// Verify and decrypt `ciphertext` (tag included) under `key` and `iv`.
///
/// # Returns
/// - `Ok(Vec<u8>)`: the recovered plaintext
/// - `Err(StegoError::AuthFailure)`: wrong key, tampered ciphertext or tampered tag
pub fn decrypt(ciphertext: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| StegoError::Unexpected(anyhow!("AES-256-GCM key setup failed: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| StegoError::AuthFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0x42; KEY_LEN];
    const IV: [u8; IV_LEN] = [0x24; IV_LEN];

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let ciphertext = encrypt(b"HELLO", &KEY, &IV).unwrap();

        assert_eq!(ciphertext.len(), 5 + TAG_LEN);
        assert_eq!(decrypt(&ciphertext, &KEY, &IV).unwrap(), b"HELLO");
    }

    #[test]
    fn test_wrong_key_is_auth_failure() {
        let ciphertext = encrypt(b"HELLO", &KEY, &IV).unwrap();
        let other_key = [0x43; KEY_LEN];

        assert!(matches!(
            decrypt(&ciphertext, &other_key, &IV),
            Err(StegoError::AuthFailure)
        ));
    }

    #[test]
    fn test_tampered_ciphertext_is_auth_failure() {
        let mut ciphertext = encrypt(b"HELLO", &KEY, &IV).unwrap();
        ciphertext[0] ^= 0x01;

        assert!(matches!(decrypt(&ciphertext, &KEY, &IV), Err(StegoError::AuthFailure)));
    }

    #[test]
    fn test_tampered_tag_is_auth_failure() {
        let mut ciphertext = encrypt(b"HELLO", &KEY, &IV).unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x80;

        assert!(matches!(decrypt(&ciphertext, &KEY, &IV), Err(StegoError::AuthFailure)));
    }

    #[test]
    fn test_truncated_ciphertext_is_auth_failure() {
        assert!(matches!(decrypt(&[0u8; 4], &KEY, &IV), Err(StegoError::AuthFailure)));
    }

    #[test]
    fn test_empty_plaintext_is_tag_only() {
        let ciphertext = encrypt(b"", &KEY, &IV).unwrap();

        assert_eq!(ciphertext.len(), TAG_LEN);
        assert!(decrypt(&ciphertext, &KEY, &IV).unwrap().is_empty());
    }
}
