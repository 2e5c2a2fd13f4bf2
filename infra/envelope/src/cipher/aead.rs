use crate::capability::SymmetricCipher;
use crate::error::EnvelopeError;
use crate::key::SecretKey;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce};
use aes_gcm::{Aes128Gcm as Aes128, Aes256Gcm as Aes256};
use chacha20poly1305::ChaCha20Poly1305;

/// AES-256-GCM with a 96-bit IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcm;

/// AES-128-GCM with a 96-bit IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes128Gcm;

/// ChaCha20-Poly1305 with a 96-bit IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaCha;

const IV_LEN: usize = 12;

impl SymmetricCipher for AesGcm {
    const IDENTIFIER: &'static str = "AES-GCM";
    const KEY_IDENTIFIER: &'static str = "AES-GCM-256";
    const KEY_LEN: usize = 32;
    const IV_LEN: usize = IV_LEN;

    fn encrypt(plaintext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        seal::<Aes256>(plaintext, key, iv)
    }

    fn decrypt(ciphertext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        open::<Aes256>(ciphertext, key, iv)
    }
}

impl SymmetricCipher for Aes128Gcm {
    const IDENTIFIER: &'static str = "AES-GCM";
    const KEY_IDENTIFIER: &'static str = "AES-GCM-128";
    const KEY_LEN: usize = 16;
    const IV_LEN: usize = IV_LEN;

    fn encrypt(plaintext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        seal::<Aes128>(plaintext, key, iv)
    }

    fn decrypt(ciphertext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        open::<Aes128>(ciphertext, key, iv)
    }
}

impl SymmetricCipher for ChaCha {
    const IDENTIFIER: &'static str = "CHACHA20-POLY1305";
    const KEY_IDENTIFIER: &'static str = "CHACHA20-POLY1305";
    const KEY_LEN: usize = 32;
    const IV_LEN: usize = IV_LEN;

    fn encrypt(plaintext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        seal::<ChaCha20Poly1305>(plaintext, key, iv)
    }

    fn decrypt(ciphertext: &[u8], key: &SecretKey, iv: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        open::<ChaCha20Poly1305>(ciphertext, key, iv)
    }
}

fn init<C: KeyInit + AeadCore>(
    key: &SecretKey,
    iv: &[u8],
) -> Result<(C, Nonce<C>), EnvelopeError> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| EnvelopeError::Key {
        message: format!("invalid key length {}", key.len()).into(),
        context: None,
    })?;

    let expected = Nonce::<C>::default().len();
    if iv.len() != expected {
        return Err(EnvelopeError::InvalidPayload {
            message: format!("IV must be {expected} bytes, got {}", iv.len()).into(),
            context: None,
        });
    }

    Ok((cipher, Nonce::<C>::clone_from_slice(iv)))
}

fn seal<C: KeyInit + Aead>(
    plaintext: &[u8],
    key: &SecretKey,
    iv: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let (cipher, nonce) = init::<C>(key, iv)?;
    cipher.encrypt(&nonce, plaintext).map_err(|_| EnvelopeError::Encryption {
        message: "AEAD encryption failed".into(),
        context: None,
    })
}

fn open<C: KeyInit + Aead>(
    ciphertext: &[u8],
    key: &SecretKey,
    iv: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let (cipher, nonce) = init::<C>(key, iv)?;
    cipher.decrypt(&nonce, ciphertext).map_err(|_| EnvelopeError::Key {
        message: "AEAD authentication failed".into(),
        context: None,
    })
}
