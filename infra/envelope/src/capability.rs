//! # Capabilities
//!
//! The cryptographic primitives an envelope is built from. Implementations are
//! stateless: every call creates its own cipher or MAC context, so one
//! capability can serve any number of threads.

use crate::error::EnvelopeError;
use crate::key::SecretKey;

/// Authenticated symmetric encryption with a per-message IV.
pub trait SymmetricCipher: Send + Sync + 'static {
    /// Written into symmetric envelopes, e.g. `AES-GCM`.
    const IDENTIFIER: &'static str;
    /// Names the key when it is wrapped inside a hybrid envelope, e.g. `AES-GCM-256`.
    const KEY_IDENTIFIER: &'static str;
    const KEY_LEN: usize;
    const IV_LEN: usize;

    /// # Errors
    /// * [`EnvelopeError::Key`] If the key has the wrong length.
    /// * [`EnvelopeError::InvalidPayload`] If the IV has the wrong length.
    fn encrypt(plaintext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError>;

    /// # Errors
    /// * [`EnvelopeError::Key`] If the key has the wrong length or authentication fails.
    /// * [`EnvelopeError::InvalidPayload`] If the IV has the wrong length.
    fn decrypt(ciphertext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError>;
}

/// Public-key encryption. Keys are never checked for being a matching pair.
pub trait AsymmetricCipher: Send + Sync + 'static {
    type PublicKey: Clone + Send + Sync + 'static;
    type PrivateKey: Clone + Send + Sync + 'static;

    const IDENTIFIER: &'static str;

    /// # Errors
    /// * [`EnvelopeError::Encryption`] If `data` exceeds what the key can hold.
    /// * [`EnvelopeError::Key`] If the key is unusable.
    fn encrypt(data: &[u8], key: &Self::PublicKey) -> Result<Vec<u8>, EnvelopeError>;

    /// # Errors
    /// * [`EnvelopeError::Key`] If the key does not open `data`.
    fn decrypt(data: &[u8], key: &Self::PrivateKey) -> Result<Vec<u8>, EnvelopeError>;
}

/// Message authentication codes.
pub trait Mac: Send + Sync + 'static {
    const IDENTIFIER: &'static str;

    /// # Errors
    /// * [`EnvelopeError::Key`] If the key is rejected by the primitive.
    fn sign(message: &[u8], key: &SecretKey) -> Result<Vec<u8>, EnvelopeError>;

    /// Compares in constant time. A tag of the wrong length is a mismatch, not an error.
    ///
    /// # Errors
    /// * [`EnvelopeError::Key`] If the key is rejected by the primitive.
    fn verify(message: &[u8], tag: &[u8], key: &SecretKey) -> Result<bool, EnvelopeError>;
}
