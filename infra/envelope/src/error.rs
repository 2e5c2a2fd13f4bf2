//! # Envelope Errors
//!
//! This module defines the [`EnvelopeError`] enum used by every envelope, signer
//! and capability adapter in this crate.

use mcf_format::FormatError;
use std::borrow::Cow;

/// A specialized [`EnvelopeError`] enum for envelope-related failures.
#[mcf_derive::mcf_error]
pub enum EnvelopeError {
    /// The key is missing, has the wrong length, or does not open the payload.
    ///
    /// AEAD authentication failures and RSA decryption failures both land here:
    /// a wrong key and tampered data are indistinguishable to the caller.
    #[error("Key error{}: {message}", format_context(.context))]
    Key { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The primitive refused to encrypt (e.g. message too long for RSA-OAEP).
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The envelope parsed but its parts are unusable (e.g. wrong IV length).
    #[error("Invalid payload{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The operating system RNG failed.
    #[error("Random source error{}: {source}", format_context(.context))]
    Random { source: getrandom::Error, context: Option<Cow<'static, str>> },

    /// Serializing or parsing the MCF document failed.
    #[error("Format error{}: {source}", format_context(.context))]
    Format { source: FormatError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal envelope error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl EnvelopeError {
    pub(crate) fn key(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Key { message: message.into(), context: None }
    }

    pub(crate) fn invalid_payload(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidPayload { message: message.into(), context: None }
    }
}
