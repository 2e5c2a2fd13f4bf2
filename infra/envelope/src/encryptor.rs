use crate::document::IvParameters;
use crate::error::EnvelopeError;
use mcf_format::{ByteEncoding, Format, Mapper, Positional};

/// Version section shared by every envelope layout.
pub const VERSION: &str = "v=1";

/// Turns bytes into a self-describing MCF string and back.
///
/// Implemented by [`crate::SymmetricEnvelope`], [`crate::AsymmetricEnvelope`]
/// and [`crate::HybridEnvelope`]. The identifier written into the string is
/// not checked when decrypting; compare [`Encryptor::identifier`] yourself if
/// a string may come from another configuration.
pub trait Encryptor: Send + Sync {
    /// # Errors
    /// * [`EnvelopeError::Key`] If the configured key is unusable.
    /// * [`EnvelopeError::Encryption`] If the primitive refuses the input.
    /// * [`EnvelopeError::Random`] If fresh IV or key material cannot be drawn.
    /// * [`EnvelopeError::Format`] If the MCF document cannot be composed.
    fn encrypt(&self, plaintext: &[u8]) -> Result<String, EnvelopeError>;

    /// # Errors
    /// * [`EnvelopeError::Format`] If `composed` is not a valid document for this scheme.
    /// * [`EnvelopeError::InvalidPayload`] If the embedded parameters are unusable.
    /// * [`EnvelopeError::Key`] If the key does not open the payload.
    fn decrypt(&self, composed: &str) -> Result<Vec<u8>, EnvelopeError>;

    fn identifier(&self) -> &str;

    fn version(&self) -> &str {
        VERSION
    }
}

/// The outer positional mapper plus the named mapper for `params`.
#[derive(Debug, Clone)]
pub(crate) struct Codec {
    pub(crate) outer: Mapper,
    params: Mapper,
}

impl Codec {
    pub(crate) fn new(encoding: ByteEncoding) -> Self {
        Self {
            outer: Mapper::new(encoding.registry(), Positional),
            params: Mapper::for_format(Format::Parameters),
        }
    }

    pub(crate) fn encode_iv(&self, iv: &[u8]) -> Result<String, EnvelopeError> {
        Ok(self.params.serialize(&IvParameters { iv: iv.to_vec() })?)
    }

    pub(crate) fn decode_iv(&self, params: &str) -> Result<Vec<u8>, EnvelopeError> {
        Ok(self.params.deserialize::<IvParameters>(params)?.iv)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(ByteEncoding::default())
    }
}
