use crate::capability::SymmetricCipher;
use crate::cipher::AesGcm;
use crate::document::SymmetricDocument;
use crate::encryptor::{Codec, Encryptor, VERSION};
use crate::error::EnvelopeError;
use crate::key::{SecretKey, random_bytes};
use mcf_format::ByteEncoding;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};
use zeroize::Zeroizing;

struct SymmetricInner {
    key: SecretKey,
    codec: Codec,
}

/// Single-key envelope: `$AES-GCM$v=1$iv=<base64>$<ciphertext>`.
///
/// Every call draws a fresh IV, so encrypting the same plaintext twice yields
/// two different strings. Cloning shares the key.
///
/// ```rust,ignore
/// use mcf_envelope::prelude::*;
///
/// let envelope = SymmetricEnvelope::<AesGcm>::new(SecretKey::generate(32)?)?;
/// let sealed = envelope.encrypt(b"secret")?;
/// assert_eq!(envelope.decrypt(&sealed)?, b"secret");
/// ```
pub struct SymmetricEnvelope<S: SymmetricCipher = AesGcm> {
    inner: Arc<SymmetricInner>,
    _cipher: PhantomData<fn() -> S>,
}

impl<S: SymmetricCipher> Clone for SymmetricEnvelope<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), _cipher: PhantomData }
    }
}

impl<S: SymmetricCipher> fmt::Debug for SymmetricEnvelope<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricEnvelope")
            .field("identifier", &S::IDENTIFIER)
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl<S: SymmetricCipher> SymmetricEnvelope<S> {
    /// # Errors
    /// * [`EnvelopeError::Key`] If `key` is not `S::KEY_LEN` bytes long.
    pub fn new(key: SecretKey) -> Result<Self, EnvelopeError> {
        check_key::<S>(&key)?;
        let inner = SymmetricInner { key, codec: Codec::default() };
        Ok(Self { inner: Arc::new(inner), _cipher: PhantomData })
    }

    /// Replaces the key on this handle and keeps the configured encoding.
    /// Clones made earlier keep the old key.
    ///
    /// # Errors
    /// * [`EnvelopeError::Key`] If `key` is not `S::KEY_LEN` bytes long. The
    ///   current key stays in place.
    pub fn set_key(&mut self, key: SecretKey) -> Result<(), EnvelopeError> {
        check_key::<S>(&key)?;
        let codec = self.inner.codec.clone();
        self.inner = Arc::new(SymmetricInner { key, codec });
        debug!(identifier = S::IDENTIFIER, "Symmetric envelope key replaced");
        Ok(())
    }

    /// Switches how the ciphertext section is encoded. Parameters stay base64.
    #[must_use]
    pub fn with_encoding(self, encoding: ByteEncoding) -> Self {
        let key = self.inner.key.clone();
        let inner = SymmetricInner { key, codec: Codec::new(encoding) };
        Self { inner: Arc::new(inner), _cipher: PhantomData }
    }
}

fn check_key<S: SymmetricCipher>(key: &SecretKey) -> Result<(), EnvelopeError> {
    if key.len() == S::KEY_LEN {
        return Ok(());
    }
    Err(EnvelopeError::Key {
        message: format!("{} requires a {}-byte key, got {}", S::IDENTIFIER, S::KEY_LEN, key.len())
            .into(),
        context: None,
    })
}

impl<S: SymmetricCipher> Encryptor for SymmetricEnvelope<S> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, EnvelopeError> {
        let working = Zeroizing::new(plaintext.to_vec());
        let iv = random_bytes(S::IV_LEN)?;
        let ciphertext = S::encrypt(&working, &self.inner.key, &iv)?;

        let document = SymmetricDocument {
            identifier: S::IDENTIFIER.to_owned(),
            version: VERSION.to_owned(),
            params: self.inner.codec.encode_iv(&iv)?,
            ciphertext,
        };
        trace!(identifier = S::IDENTIFIER, len = plaintext.len(), "Sealing symmetric envelope");
        Ok(self.inner.codec.outer.serialize(&document)?)
    }

    fn decrypt(&self, composed: &str) -> Result<Vec<u8>, EnvelopeError> {
        let document: SymmetricDocument = self.inner.codec.outer.deserialize(composed)?;
        let iv = self.inner.codec.decode_iv(&document.params)?;
        if iv.len() != S::IV_LEN {
            return Err(EnvelopeError::invalid_payload(format!(
                "{} expects a {}-byte IV, got {}",
                S::IDENTIFIER,
                S::IV_LEN,
                iv.len()
            )));
        }
        S::decrypt(&document.ciphertext, &self.inner.key, &iv)
    }

    fn identifier(&self) -> &str {
        S::IDENTIFIER
    }
}
