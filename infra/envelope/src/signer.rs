use crate::capability::Mac;
use crate::document::SignatureDocument;
use crate::encryptor::{Codec, VERSION};
use crate::error::EnvelopeError;
use crate::key::SecretKey;
use crate::mac::HmacSha256;
use mcf_format::ByteEncoding;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

struct SignerInner {
    key: SecretKey,
    codec: Codec,
}

/// Produces and checks MAC signatures in MCF form: `$HMAC-SHA256$v=1$<hex tag>`.
pub struct McfSigner<M: Mac = HmacSha256> {
    inner: Arc<SignerInner>,
    _mac: PhantomData<fn() -> M>,
}

impl<M: Mac> Clone for McfSigner<M> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), _mac: PhantomData }
    }
}

impl<M: Mac> fmt::Debug for McfSigner<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McfSigner")
            .field("identifier", &M::IDENTIFIER)
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl<M: Mac> McfSigner<M> {
    #[must_use]
    pub fn new(key: SecretKey) -> Self {
        let inner = SignerInner { key, codec: Codec::new(ByteEncoding::Hex) };
        Self { inner: Arc::new(inner), _mac: PhantomData }
    }

    #[must_use]
    pub fn identifier(&self) -> &'static str {
        M::IDENTIFIER
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// # Errors
    /// * [`EnvelopeError::Key`] If the MAC rejects the key.
    /// * [`EnvelopeError::Format`] If the signature document cannot be composed.
    pub fn sign(&self, message: &[u8]) -> Result<String, EnvelopeError> {
        let document = SignatureDocument {
            identifier: M::IDENTIFIER.to_owned(),
            version: VERSION.to_owned(),
            tag: M::sign(message, &self.inner.key)?,
        };
        Ok(self.inner.codec.outer.serialize(&document)?)
    }

    /// Returns `false` when the tag does not match `message` under this key.
    ///
    /// # Errors
    /// * [`EnvelopeError::Format`] If `signature` is not a valid signature string.
    /// * [`EnvelopeError::Key`] If the MAC rejects the key.
    pub fn verify(&self, signature: &str, message: &[u8]) -> Result<bool, EnvelopeError> {
        let document: SignatureDocument = self.inner.codec.outer.deserialize(signature)?;
        M::verify(message, &document.tag, &self.inner.key)
    }
}
