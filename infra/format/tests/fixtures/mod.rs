#![allow(dead_code)]

use mcf_format::prelude::*;

/// A password-hash shaped record mapped through a generated creator.
#[mcf_model]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    #[mcf(order = 0)]
    pub identifier: String,
    #[mcf(order = 1, name = "v")]
    pub version: u32,
    #[mcf(order = 2)]
    pub salt: Vec<u8>,
    #[mcf(order = 3)]
    pub hash: Box<[u8]>,
    /// Not part of the MCF string.
    pub label: Option<String>,
}

/// Rebuilt through `Default` and per-field setters.
#[mcf_model(construct = "setters")]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    #[mcf(order = 1)]
    pub ratio: f64,
    #[mcf(order = 0)]
    pub name: String,
    #[mcf(order = 2)]
    pub enabled: bool,
    #[mcf(order = 3)]
    pub marker: char,
}

#[must_use]
pub fn credential() -> Credential {
    Credential {
        identifier: "PBKDF2-SHA256".into(),
        version: 1,
        salt: vec![0x00, 0x11, 0x22, 0x33],
        hash: vec![0xde, 0xad, 0xbe, 0xef].into_boxed_slice(),
        label: None,
    }
}

#[must_use]
pub fn settings() -> Settings {
    Settings { ratio: 0.25, name: "primary".into(), enabled: true, marker: '#' }
}
