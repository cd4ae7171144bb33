//! # Error Taxonomy
//!
//! Every failure an encode or decode run can end in. All variants are
//! recoverable at the call boundary; nothing here is retried automatically,
//! since cryptographic and capacity failures are not transient.

use thiserror::Error;

/// Errors produced by the encode and decode paths.
#[derive(Error, Debug)]
pub enum StegoError {
    /// A required input (password, message, image) is missing or unusable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The framed payload does not fit into the carrier's R, G, B channels.
    #[error("payload too large for image: need {required_bits} bits but only {available_bits} bits available")]
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },

    /// Integrity check failed. Wrong password and tampered data are
    /// indistinguishable by construction.
    #[error("wrong password or corrupted data")]
    AuthFailure,

    /// The scan ran off the end of the pixel data before a complete
    /// length prefix and payload were assembled.
    #[error("no hidden data found")]
    NotFound,

    /// Failure from an image collaborator or a cryptographic primitive.
    #[error("unexpected error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl StegoError {
    /// Shorthand for building a [`StegoError::Validation`].
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StegoError>;
