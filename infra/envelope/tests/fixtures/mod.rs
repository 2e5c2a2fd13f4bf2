#![allow(dead_code)]

use mcf_envelope::prelude::*;
use rand_core::OsRng;
use std::sync::LazyLock;

#[derive(Debug)]
pub struct KeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

fn generate() -> KeyPair {
    let private = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation failed");
    KeyPair { public: private.to_public_key(), private }
}

/// Recipient key pair shared by every test in a binary.
pub static RECIPIENT: LazyLock<KeyPair> = LazyLock::new(generate);

/// An unrelated key pair, for wrong-key and rotation scenarios.
pub static STRANGER: LazyLock<KeyPair> = LazyLock::new(generate);

#[must_use]
pub fn hybrid() -> HybridEnvelope {
    HybridEnvelope::new(RECIPIENT.public.clone(), RECIPIENT.private.clone())
}

#[must_use]
pub fn asymmetric() -> AsymmetricEnvelope {
    AsymmetricEnvelope::new(RECIPIENT.public.clone(), RECIPIENT.private.clone())
}

#[must_use]
pub fn symmetric_key() -> SecretKey {
    SecretKey::generate(32).expect("System RNG unavailable")
}
