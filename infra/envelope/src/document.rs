//! MCF layouts written by the envelopes.

use mcf_format::mcf_model;

/// `$<identifier>$<version>$<params>$<ciphertext>`
#[mcf_model]
#[derive(Debug)]
pub(crate) struct SymmetricDocument {
    #[mcf(order = 0)]
    pub(crate) identifier: String,
    #[mcf(order = 1)]
    pub(crate) version: String,
    #[mcf(order = 2)]
    pub(crate) params: String,
    #[mcf(order = 3)]
    pub(crate) ciphertext: Vec<u8>,
}

/// `$<identifier>$<version>$<ciphertext>`
#[mcf_model]
#[derive(Debug)]
pub(crate) struct AsymmetricDocument {
    #[mcf(order = 0)]
    pub(crate) identifier: String,
    #[mcf(order = 1)]
    pub(crate) version: String,
    #[mcf(order = 2)]
    pub(crate) ciphertext: Vec<u8>,
}

/// `$<identifier>$<version>$<params>$<encrypted key>$<encrypted payload>`
#[mcf_model]
#[derive(Debug)]
pub(crate) struct HybridDocument {
    #[mcf(order = 0)]
    pub(crate) identifier: String,
    #[mcf(order = 1)]
    pub(crate) version: String,
    #[mcf(order = 2)]
    pub(crate) params: String,
    #[mcf(order = 3)]
    pub(crate) encrypted_key: Vec<u8>,
    #[mcf(order = 4)]
    pub(crate) encrypted_payload: Vec<u8>,
}

/// `$<identifier>$<version>$<tag>`
#[mcf_model]
#[derive(Debug)]
pub(crate) struct SignatureDocument {
    #[mcf(order = 0)]
    pub(crate) identifier: String,
    #[mcf(order = 1)]
    pub(crate) version: String,
    #[mcf(order = 2)]
    pub(crate) tag: Vec<u8>,
}

/// Named sub-document embedded as the `params` section: `iv=<base64>`.
#[mcf_model]
#[derive(Debug)]
pub(crate) struct IvParameters {
    #[mcf(order = 0)]
    pub(crate) iv: Vec<u8>,
}
