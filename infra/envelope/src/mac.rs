use crate::capability::Mac;
use crate::error::EnvelopeError;
use crate::key::SecretKey;
use hmac::Hmac;
use hmac::digest::KeyInit;
use sha2::{Sha256, Sha384, Sha512};

/// HMAC over SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

/// HMAC over SHA-384.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha384;

/// HMAC over SHA-512.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha512;

impl Mac for HmacSha256 {
    const IDENTIFIER: &'static str = "HMAC-SHA256";

    fn sign(message: &[u8], key: &SecretKey) -> Result<Vec<u8>, EnvelopeError> {
        compute::<Hmac<Sha256>>(message, key)
    }

    fn verify(message: &[u8], tag: &[u8], key: &SecretKey) -> Result<bool, EnvelopeError> {
        check::<Hmac<Sha256>>(message, tag, key)
    }
}

impl Mac for HmacSha384 {
    const IDENTIFIER: &'static str = "HMAC-SHA384";

    fn sign(message: &[u8], key: &SecretKey) -> Result<Vec<u8>, EnvelopeError> {
        compute::<Hmac<Sha384>>(message, key)
    }

    fn verify(message: &[u8], tag: &[u8], key: &SecretKey) -> Result<bool, EnvelopeError> {
        check::<Hmac<Sha384>>(message, tag, key)
    }
}

impl Mac for HmacSha512 {
    const IDENTIFIER: &'static str = "HMAC-SHA512";

    fn sign(message: &[u8], key: &SecretKey) -> Result<Vec<u8>, EnvelopeError> {
        compute::<Hmac<Sha512>>(message, key)
    }

    fn verify(message: &[u8], tag: &[u8], key: &SecretKey) -> Result<bool, EnvelopeError> {
        check::<Hmac<Sha512>>(message, tag, key)
    }
}

fn init<M: hmac::Mac + KeyInit>(message: &[u8], key: &SecretKey) -> Result<M, EnvelopeError> {
    let mut mac = <M as KeyInit>::new_from_slice(key.as_bytes())
        .map_err(|_| EnvelopeError::key(format!("HMAC rejected a {}-byte key", key.len())))?;
    mac.update(message);
    Ok(mac)
}

fn compute<M: hmac::Mac + KeyInit>(
    message: &[u8],
    key: &SecretKey,
) -> Result<Vec<u8>, EnvelopeError> {
    Ok(init::<M>(message, key)?.finalize().into_bytes().to_vec())
}

fn check<M: hmac::Mac + KeyInit>(
    message: &[u8],
    tag: &[u8],
    key: &SecretKey,
) -> Result<bool, EnvelopeError> {
    Ok(init::<M>(message, key)?.verify_slice(tag).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231, test case 2.
    const KEY: &[u8] = b"Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn rfc4231_case_2() {
        let key = SecretKey::from_bytes(KEY);

        assert_eq!(
            HmacSha256::sign(DATA, &key).unwrap(),
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
        assert_eq!(
            HmacSha512::sign(DATA, &key).unwrap(),
            hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
                "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            )
        );
        assert_eq!(HmacSha384::sign(DATA, &key).unwrap().len(), 48);
    }

    #[test]
    fn verify_rejects_other_tags() {
        let key = SecretKey::from_bytes(KEY);
        let tag = HmacSha256::sign(DATA, &key).unwrap();

        assert!(HmacSha256::verify(DATA, &tag, &key).unwrap());
        assert!(!HmacSha256::verify(b"other message", &tag, &key).unwrap());
        assert!(!HmacSha256::verify(DATA, &tag[..16], &key).unwrap());
    }
}
