//! # Staged Encode / Decode Pipeline
//!
//! Async front door used by the CLI and the web server. Each call owns its
//! pixel buffer for the whole run; nothing is shared between calls.
//!
//! ## Stages
//!
//! ```text
//! encode: validate -> image source* -> seal (PBKDF2 + AES-GCM)* -> frame
//!         -> capacity check -> embed -> image sink*
//! decode: validate -> image source* -> extract -> open (PBKDF2 + AES-GCM)*
//! ```
//!
//! Stages marked `*` are the only suspension points. Key derivation and the
//! cipher run on tokio's blocking pool; packing and extraction stay inline
//! since they are pure in-memory loops. There is no cancellation: once
//! started, a run ends in a result.

use anyhow::Context;
use log::{debug, info, warn};

use crate::crypto::EncryptedPayload;
use crate::error::{Result, StegoError};
use crate::image_io::{ImageSink, ImageSource, PngCodec};
use crate::stego::{self, DecodeOutcome};

/// Inputs for hiding a message. `None` or empty fields fail validation.
#[derive(Debug, Clone, Default)]
pub struct EncodeRequest {
    pub image: Option<Vec<u8>>,
    pub message: Option<String>,
    pub password: Option<String>,
}

/// Inputs for recovering a message.
#[derive(Debug, Clone, Default)]
pub struct DecodeRequest {
    pub image: Option<Vec<u8>>,
    pub password: Option<String>,
}

fn require_bytes(field: Option<Vec<u8>>, name: &str) -> Result<Vec<u8>> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StegoError::validation(format!("{} is required", name)))
}

fn require_text(field: Option<String>, name: &str) -> Result<String> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| StegoError::validation(format!("{} is required", name)))
}

fn log_outcome(outcome: &DecodeOutcome) {
    match outcome {
        DecodeOutcome::Success(message) => {
            info!("✅ Recovered hidden message ({} bytes)", message.len())
        }
        other => warn!("⚠️ Decode finished without a message: {}", other.describe()),
    }
}

/// Encode/decode pipeline over an image source and sink.
#[derive(Debug, Clone)]
pub struct Pipeline<S, K> {
    source: S,
    sink: K,
}

impl Pipeline<PngCodec, PngCodec> {
    /// Pipeline backed by the `image` crate, writing PNG.
    pub fn png(max_input_bytes: u64) -> Self {
        let codec = PngCodec::new(max_input_bytes);
        Self::new(codec.clone(), codec)
    }
}

impl<S, K> Pipeline<S, K>
where
    S: ImageSource,
    K: ImageSink,
{
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    /// Hide `request.message` in `request.image`, returning the encoded carrier.
    ///
    /// # Errors
    /// - `StegoError::Validation`: missing image, message or password
    /// - `StegoError::CapacityExceeded`: message too large for the image;
    ///   nothing was written
    /// - `StegoError::Unexpected`: image decode/encode or cipher failure
    pub async fn encode(&self, request: EncodeRequest) -> Result<Vec<u8>> {
        // ========== STAGE 1: Validate inputs ==========
        let password = require_text(request.password, "password")?;
        let message = require_text(request.message, "message")?;
        let image = require_bytes(request.image, "image")?;

        // ========== STAGE 2: Decode carrier ==========
        let mut buffer = self.source.load(image).await?;
        debug!(
            "Carrier is {}x{} ({} channels)",
            buffer.width(),
            buffer.height(),
            buffer.channel_count()
        );

        // ========== STAGE 3: Derive key and encrypt ==========
        let payload = tokio::task::spawn_blocking(move || {
            EncryptedPayload::seal(message.as_bytes(), &password)
        })
        .await
        .context("encryption task panicked")??;
        debug!("Sealed {}-byte encrypted payload", payload.len());

        // ========== STAGE 4: Frame, check capacity, embed ==========
        stego::embed_payload(&mut buffer, &payload)?;

        // ========== STAGE 5: Encode carrier ==========
        let output = self.sink.store(buffer).await?;
        info!("✅ Message embedded, carrier is {} bytes", output.len());

        Ok(output)
    }

    /// Recover the message hidden in `request.image`.
    ///
    /// # Returns
    /// - `Ok(DecodeOutcome::Success)`: the hidden message
    /// - `Ok(DecodeOutcome::AuthFailure)`: wrong password or corrupted data
    /// - `Ok(DecodeOutcome::NotFound)`: no complete payload in the image
    /// - `Err`: validation failure or unexpected collaborator error
    pub async fn decode(&self, request: DecodeRequest) -> Result<DecodeOutcome> {
        // ========== STAGE 1: Validate inputs ==========
        let password = require_text(request.password, "password")?;
        let image = require_bytes(request.image, "image")?;

        // ========== STAGE 2: Decode carrier ==========
        let buffer = self.source.load(image).await?;

        // ========== STAGE 3: Extract framed payload ==========
        let result = match stego::extract_payload(&buffer) {
            Ok(payload) => {
                drop(buffer);

                // ========== STAGE 4: Derive key, verify and decrypt ==========
                tokio::task::spawn_blocking(move || stego::open_text(&payload, &password))
                    .await
                    .context("decryption task panicked")?
            }
            Err(e) => Err(e),
        };

        let outcome = DecodeOutcome::from_result(result)?;
        log_outcome(&outcome);

        Ok(outcome)
    }
}
