//! # Conceal / Reveal
//!
//! Synchronous composition of the full encode and decode paths over a
//! [`PixelBuffer`]:
//!
//! ```text
//! conceal: seal (PBKDF2 + AES-GCM) -> frame -> capacity check -> embed
//! reveal:  extract -> split salt/iv/ciphertext -> PBKDF2 -> verify + decrypt
//! ```
//!
//! These block on key derivation. The async [`pipeline`][crate::pipeline]
//! runs the same stages with the crypto moved off the runtime threads.

use log::{debug, warn};

use crate::crypto::EncryptedPayload;
use crate::error::{Result, StegoError};
use crate::processing::{capacity, framing, steganography, PixelBuffer};

/// Terminal outcome of a decode that did not hit an unexpected error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The hidden message, verified and decrypted.
    Success(String),
    /// Wrong password or corrupted embedded data.
    AuthFailure,
    /// No complete framed payload in the image.
    NotFound,
}

impl DecodeOutcome {
    /// Fold a decode result into the tagged outcome.
    ///
    /// `AuthFailure` and `NotFound` become outcomes; every other error is
    /// handed back to the caller.
    pub fn from_result(result: Result<String>) -> Result<Self> {
        match result {
            Ok(message) => Ok(Self::Success(message)),
            Err(StegoError::AuthFailure) => Ok(Self::AuthFailure),
            Err(StegoError::NotFound) => Ok(Self::NotFound),
            Err(e) => Err(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable summary suitable for showing to the user.
    pub fn describe(&self) -> &str {
        match self {
            Self::Success(message) => message,
            Self::AuthFailure => "wrong password or corrupted data",
            Self::NotFound => "no hidden data found",
        }
    }
}

/// Frame an encrypted payload and embed it, after the capacity check.
///
/// On `CapacityExceeded` the buffer is left byte-for-byte unchanged.
pub fn embed_payload(buffer: &mut PixelBuffer, payload: &EncryptedPayload) -> Result<()> {
    let bytes = payload.to_bytes();
    let framed = framing::frame(&bytes)?;
    debug_assert_eq!(framing::unframe(&framed), Some(bytes.as_slice()));
    capacity::validate(framed.len(), buffer.channel_count())?;

    debug!(
        "Embedding {}-byte frame into {}x{} image",
        framed.len(),
        buffer.width(),
        buffer.height()
    );
    steganography::embed_bits(buffer, &framed);
    Ok(())
}

/// Extract the candidate encrypted payload from `buffer`.
pub fn extract_payload(buffer: &PixelBuffer) -> Result<EncryptedPayload> {
    let bytes = steganography::extract_framed(buffer)?;
    EncryptedPayload::from_bytes(&bytes)
}

/// Decrypt a payload into text.
pub fn open_text(payload: &EncryptedPayload, password: &str) -> Result<String> {
    let plaintext = payload.open(password)?;
    String::from_utf8(plaintext).map_err(|e| {
        StegoError::Unexpected(anyhow::Error::new(e).context("decrypted message is not UTF-8"))
    })
}

/// Encrypt `message` under `password` and hide it in `buffer`.
///
/// # Errors
/// - `StegoError::CapacityExceeded`: the buffer is untouched
/// - `StegoError::Unexpected`: the cipher failed
///
/// # Example
/// ```ignore
/// let mut buffer = PixelBuffer::filled(100, 100, 0x80)?;
/// conceal(&mut buffer, "HELLO", "test123")?;
/// assert_eq!(reveal(&buffer, "test123")?, DecodeOutcome::Success("HELLO".into()));
/// ```
pub fn conceal(buffer: &mut PixelBuffer, message: &str, password: &str) -> Result<()> {
    let payload = EncryptedPayload::seal(message.as_bytes(), password)?;
    embed_payload(buffer, &payload)
}

/// Recover the message hidden in `buffer` with `password`.
pub fn reveal(buffer: &PixelBuffer, password: &str) -> Result<DecodeOutcome> {
    let result = extract_payload(buffer).and_then(|payload| open_text(&payload, password));
    let outcome = DecodeOutcome::from_result(result)?;

    if !outcome.is_success() {
        warn!("⚠️ Decode finished without a message: {}", outcome.describe());
    }
    Ok(outcome)
}
