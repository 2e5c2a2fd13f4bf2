use crate::error::EnvelopeError;
use getrandom::fill;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw symmetric or MAC key material, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Box<[u8]>,
}

impl SecretKey {
    /// Draws `len` bytes from the OS RNG.
    ///
    /// # Errors
    /// * [`EnvelopeError::Random`] If the system RNG is unavailable.
    pub fn generate(len: usize) -> Result<Self, EnvelopeError> {
        Ok(Self { bytes: random_bytes(len)?.into_boxed_slice() })
    }

    /// Copies `bytes` into a new key. The caller's buffer is left untouched.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { bytes: bytes.into() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

pub(crate) fn random_bytes(len: usize) -> Result<Vec<u8>, EnvelopeError> {
    let mut bytes = vec![0u8; len];
    fill(&mut bytes)?;
    Ok(bytes)
}
