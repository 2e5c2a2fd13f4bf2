use crate::capability::AsymmetricCipher;
use crate::cipher::RsaOaep;
use crate::document::AsymmetricDocument;
use crate::encryptor::{Codec, Encryptor, VERSION};
use crate::error::EnvelopeError;
use mcf_format::ByteEncoding;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use zeroize::Zeroizing;

struct AsymmetricInner<A: AsymmetricCipher> {
    public: A::PublicKey,
    private: A::PrivateKey,
    codec: Codec,
}

/// Public-key envelope: `$RSA-OAEP-SHA256-MGF1$v=1$<ciphertext>`.
///
/// Encrypts with the public key and decrypts with the private key. The two
/// keys are never checked against each other, which allows a rotation window
/// where new strings are sealed for the next key while old ones are still
/// opened with the current one. A mismatched pair shows up as a
/// [`EnvelopeError::Key`] on decrypt.
///
/// The plaintext must fit the asymmetric primitive (190 bytes for RSA-2048 with
/// OAEP-SHA256); use [`crate::HybridEnvelope`] for anything larger.
pub struct AsymmetricEnvelope<A: AsymmetricCipher = RsaOaep> {
    inner: Arc<AsymmetricInner<A>>,
}

impl<A: AsymmetricCipher> Clone for AsymmetricEnvelope<A> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<A: AsymmetricCipher> fmt::Debug for AsymmetricEnvelope<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricEnvelope")
            .field("identifier", &A::IDENTIFIER)
            .field("codec", &self.inner.codec)
            .finish_non_exhaustive()
    }
}

impl<A: AsymmetricCipher> AsymmetricEnvelope<A> {
    #[must_use]
    pub fn new(public: A::PublicKey, private: A::PrivateKey) -> Self {
        Self { inner: Arc::new(AsymmetricInner { public, private, codec: Codec::default() }) }
    }

    /// Replaces both keys on this handle. Clones made earlier keep the old keys.
    pub fn set_keys(&mut self, public: A::PublicKey, private: A::PrivateKey) {
        let codec = self.inner.codec.clone();
        self.inner = Arc::new(AsymmetricInner { public, private, codec });
        debug!(identifier = A::IDENTIFIER, "Asymmetric envelope keys replaced");
    }

    /// Switches how the ciphertext section is encoded.
    #[must_use]
    pub fn with_encoding(self, encoding: ByteEncoding) -> Self {
        let inner = AsymmetricInner {
            public: self.inner.public.clone(),
            private: self.inner.private.clone(),
            codec: Codec::new(encoding),
        };
        Self { inner: Arc::new(inner) }
    }
}

impl<A: AsymmetricCipher> Encryptor for AsymmetricEnvelope<A> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, EnvelopeError> {
        let working = Zeroizing::new(plaintext.to_vec());
        let ciphertext = A::encrypt(&working, &self.inner.public)?;

        let document = AsymmetricDocument {
            identifier: A::IDENTIFIER.to_owned(),
            version: VERSION.to_owned(),
            ciphertext,
        };
        trace!(identifier = A::IDENTIFIER, len = plaintext.len(), "Sealing asymmetric envelope");
        Ok(self.inner.codec.outer.serialize(&document)?)
    }

    fn decrypt(&self, composed: &str) -> Result<Vec<u8>, EnvelopeError> {
        let document: AsymmetricDocument = self.inner.codec.outer.deserialize(composed)?;
        A::decrypt(&document.ciphertext, &self.inner.private)
    }

    fn identifier(&self) -> &str {
        A::IDENTIFIER
    }
}
