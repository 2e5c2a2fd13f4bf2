use crate::capability::{AsymmetricCipher, SymmetricCipher};
use crate::cipher::{AesGcm, RsaOaep};
use crate::document::HybridDocument;
use crate::encryptor::{Codec, Encryptor, VERSION};
use crate::error::EnvelopeError;
use crate::key::{SecretKey, random_bytes};
use mcf_format::ByteEncoding;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;
use zeroize::Zeroizing;

struct HybridInner<A: AsymmetricCipher> {
    public: A::PublicKey,
    private: A::PrivateKey,
    identifier: String,
    codec: Codec,
}

/// Envelope encryption for payloads of any size.
///
/// Each call generates a fresh symmetric key and IV, encrypts the payload with
/// them, and wraps the raw key with the recipient's public key:
///
/// ```text
/// $RSA-OAEP-SHA256-MGF1+AES-GCM-256$v=1$iv=<base64>$<encrypted key>$<encrypted payload>
/// ```
///
/// Key pairing is not validated, as with [`crate::AsymmetricEnvelope`].
pub struct HybridEnvelope<A: AsymmetricCipher = RsaOaep, S: SymmetricCipher = AesGcm> {
    inner: Arc<HybridInner<A>>,
    _cipher: PhantomData<fn() -> S>,
}

impl<A: AsymmetricCipher, S: SymmetricCipher> Clone for HybridEnvelope<A, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), _cipher: PhantomData }
    }
}

impl<A: AsymmetricCipher, S: SymmetricCipher> fmt::Debug for HybridEnvelope<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridEnvelope")
            .field("identifier", &self.inner.identifier)
            .field("codec", &self.inner.codec)
            .finish_non_exhaustive()
    }
}

impl<A: AsymmetricCipher, S: SymmetricCipher> HybridEnvelope<A, S> {
    #[must_use]
    pub fn new(public: A::PublicKey, private: A::PrivateKey) -> Self {
        Self::assemble(public, private, Codec::default())
    }

    /// Replaces both keys on this handle. Clones made earlier keep the old keys.
    pub fn set_keys(&mut self, public: A::PublicKey, private: A::PrivateKey) {
        *self = Self::assemble(public, private, self.inner.codec.clone());
    }

    /// Switches how the key and payload sections are encoded.
    #[must_use]
    pub fn with_encoding(self, encoding: ByteEncoding) -> Self {
        Self::assemble(self.inner.public.clone(), self.inner.private.clone(), Codec::new(encoding))
    }

    fn assemble(public: A::PublicKey, private: A::PrivateKey, codec: Codec) -> Self {
        let identifier = format!("{}+{}", A::IDENTIFIER, S::KEY_IDENTIFIER);
        Self {
            inner: Arc::new(HybridInner { public, private, identifier, codec }),
            _cipher: PhantomData,
        }
    }
}

impl<A: AsymmetricCipher, S: SymmetricCipher> Encryptor for HybridEnvelope<A, S> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, EnvelopeError> {
        let working = Zeroizing::new(plaintext.to_vec());
        let key = SecretKey::generate(S::KEY_LEN)?;
        let iv = random_bytes(S::IV_LEN)?;

        let encrypted_payload = S::encrypt(&working, &key, &iv)?;
        let encrypted_key = A::encrypt(key.as_bytes(), &self.inner.public)?;

        let document = HybridDocument {
            identifier: self.inner.identifier.clone(),
            version: VERSION.to_owned(),
            params: self.inner.codec.encode_iv(&iv)?,
            encrypted_key,
            encrypted_payload,
        };
        trace!(
            identifier = %self.inner.identifier,
            len = plaintext.len(),
            "Sealing hybrid envelope"
        );
        Ok(self.inner.codec.outer.serialize(&document)?)
    }

    fn decrypt(&self, composed: &str) -> Result<Vec<u8>, EnvelopeError> {
        let document: HybridDocument = self.inner.codec.outer.deserialize(composed)?;
        let iv = self.inner.codec.decode_iv(&document.params)?;

        let raw = Zeroizing::new(A::decrypt(&document.encrypted_key, &self.inner.private)?);
        if raw.len() != S::KEY_LEN {
            return Err(EnvelopeError::key(format!(
                "unwrapped key is {} bytes, {} requires {}",
                raw.len(),
                S::KEY_IDENTIFIER,
                S::KEY_LEN
            )));
        }
        let key = SecretKey::from_bytes(&raw);

        S::decrypt(&document.encrypted_payload, &key, &iv)
    }

    fn identifier(&self) -> &str {
        &self.inner.identifier
    }
}
