mod aead;
mod rsa;

pub use aead::{Aes128Gcm, AesGcm, ChaCha};
pub use rsa::RsaOaep;
