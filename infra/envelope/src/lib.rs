//! # MCF Envelope
//!
//! Encryption envelopes that serialize to self-describing Modular Crypt Format
//! strings, built on [`mcf_format`].
//!
//! | Scheme | Layout |
//! |---|---|
//! | [`SymmetricEnvelope`] | `$AES-GCM$v=1$iv=<base64>$<ciphertext>` |
//! | [`AsymmetricEnvelope`] | `$RSA-OAEP-SHA256-MGF1$v=1$<ciphertext>` |
//! | [`HybridEnvelope`] | `$RSA-OAEP-SHA256-MGF1+AES-GCM-256$v=1$iv=<base64>$<key>$<payload>` |
//! | [`McfSigner`] | `$HMAC-SHA256$v=1$<hex tag>` |
//!
//! Byte sections are standard base64 unless the envelope is switched with
//! `with_encoding(ByteEncoding::Hex)`; the `params` section is always a named
//! `key=value` string with base64 bytes.
//!
//! Primitives come in through the [`capability`] traits. The adapters in
//! [`algorithms`] wrap RustCrypto implementations.
//!
//! ## IV Policy
//!
//! Every encryption draws a random 96-bit IV from the OS RNG. Random IVs are
//! probabilistic: rotate symmetric keys well before 2^32 messages per key.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mcf_envelope::prelude::*;
//!
//! let envelope = HybridEnvelope::<RsaOaep, AesGcm>::new(public_key, private_key);
//! let sealed = envelope.encrypt(b"large payload")?;
//! assert!(sealed.starts_with("$RSA-OAEP-SHA256-MGF1+AES-GCM-256$v=1$iv="));
//! assert_eq!(envelope.decrypt(&sealed)?, b"large payload");
//! ```

mod asymmetric;
pub mod capability;
mod cipher;
mod document;
mod encryptor;
mod error;
mod hybrid;
mod key;
mod mac;
mod signer;
mod symmetric;

pub use asymmetric::AsymmetricEnvelope;
pub use encryptor::{Encryptor, VERSION};
pub use error::{EnvelopeError, EnvelopeErrorExt};
pub use hybrid::HybridEnvelope;
pub use key::SecretKey;
pub use mcf_format::ByteEncoding;
pub use rsa::{RsaPrivateKey, RsaPublicKey};
pub use signer::McfSigner;
pub use symmetric::SymmetricEnvelope;

pub mod algorithms {
    pub use crate::cipher::{Aes128Gcm, AesGcm, ChaCha, RsaOaep};
    pub use crate::mac::{HmacSha256, HmacSha384, HmacSha512};
}

pub mod prelude {
    pub use crate::algorithms::*;
    pub use crate::{
        AsymmetricEnvelope, ByteEncoding, Encryptor, EnvelopeError, EnvelopeErrorExt,
        HybridEnvelope, McfSigner, RsaPrivateKey, RsaPublicKey, SecretKey, SymmetricEnvelope,
    };
}
