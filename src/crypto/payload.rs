//! # Encrypted Payload
//!
//! Byte layout of what gets framed and embedded:
//!
//! ```text
//! [16 bytes] PBKDF2 salt
//! [12 bytes] AES-GCM IV
//! [N bytes ] ciphertext with the 16-byte tag appended
//! ```
//!
//! Salt and IV are not secret; both are drawn fresh for every seal.

use rand::rngs::OsRng;
use rand::RngCore;

use super::cipher::{self, IV_LEN, TAG_LEN};
use super::kdf::{derive_key, SALT_LEN};
use crate::error::{Result, StegoError};

/// Fixed overhead added to the plaintext: salt + IV + tag = 44 bytes.
pub const PAYLOAD_OVERHEAD: usize = SALT_LEN + IV_LEN + TAG_LEN;

/// A sealed message ready to be framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Encrypt `plaintext` under a key derived from `password`.
    ///
    /// Generates a fresh salt and IV from the OS RNG, derives the key and
    /// runs AES-256-GCM. Blocking: the derivation is deliberately slow.
    pub fn seal(plaintext: &[u8], password: &str) -> Result<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);

        let key = derive_key(password, &salt);
        let ciphertext = cipher::encrypt(plaintext, &key, &iv)?;

        Ok(Self { salt, iv, ciphertext })
    }

    /// Verify and decrypt with a key derived from `password`.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: plaintext
    /// - `Err(StegoError::AuthFailure)`: wrong password or corrupted data
    pub fn open(&self, password: &str) -> Result<Vec<u8>> {
        let key = derive_key(password, &self.salt);
        cipher::decrypt(&self.ciphertext, &key, &self.iv)
    }

    /// Serialize as `salt ∥ iv ∥ ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SALT_LEN + IV_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split extracted bytes back into salt, IV and ciphertext.
    ///
    /// Anything shorter than salt + IV + tag cannot come from [`seal`][Self::seal];
    /// it is reported as [`StegoError::AuthFailure`] since corrupted data and a
    /// wrong password share one outcome.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < PAYLOAD_OVERHEAD {
            return Err(StegoError::AuthFailure);
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (iv, ciphertext) = rest.split_at(IV_LEN);

        let mut payload = Self {
            salt: [0u8; SALT_LEN],
            iv: [0u8; IV_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        payload.salt.copy_from_slice(salt);
        payload.iv.copy_from_slice(iv);

        Ok(payload)
    }

    /// Serialized length in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        SALT_LEN + IV_LEN + self.ciphertext.len()
    }
}
