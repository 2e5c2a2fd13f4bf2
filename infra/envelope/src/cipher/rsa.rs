use crate::capability::AsymmetricCipher;
use crate::error::EnvelopeError;
use rand_core::OsRng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// RSA-OAEP with SHA-256 for both the label hash and MGF1.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaOaep;

impl AsymmetricCipher for RsaOaep {
    type PublicKey = RsaPublicKey;
    type PrivateKey = RsaPrivateKey;

    const IDENTIFIER: &'static str = "RSA-OAEP-SHA256-MGF1";

    fn encrypt(data: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>, EnvelopeError> {
        key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), data).map_err(|err| match err {
            rsa::Error::MessageTooLong => EnvelopeError::Encryption {
                message: format!("{} bytes exceed the RSA-OAEP capacity of this key", data.len())
                    .into(),
                context: None,
            },
            other => EnvelopeError::key(other.to_string()),
        })
    }

    fn decrypt(data: &[u8], key: &RsaPrivateKey) -> Result<Vec<u8>, EnvelopeError> {
        key.decrypt(Oaep::new::<Sha256>(), data)
            .map_err(|err| EnvelopeError::key(format!("RSA-OAEP decryption failed: {err}")))
    }
}
