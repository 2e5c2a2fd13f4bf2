//! # Conversion Profiles
//!
//! Preloaded registries. [`basic`] covers text, integers, floats, `char` and
//! `bool`; [`base64`] and [`hex`] add byte sequences in the respective
//! textual encoding.

use crate::convert::{ConversionRegistry, ConversionRegistryBuilder};
use crate::error::FormatError;
use ::base64::Engine;
use ::base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::any::{Any, type_name};
use std::fmt::Display;
use std::str::FromStr;

/// Textual encoding applied to byte-sequence fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteEncoding {
    /// Standard alphabet, padded.
    #[default]
    Base64,
    /// Lowercase hexadecimal; decoding accepts either case.
    Hex,
}

impl ByteEncoding {
    /// Builds the full profile registry for this encoding.
    #[must_use]
    pub fn registry(self) -> ConversionRegistry {
        match self {
            Self::Base64 => base64(),
            Self::Hex => hex(),
        }
    }
}

/// Scalars and text, without byte sequences.
pub fn basic() -> ConversionRegistryBuilder {
    let builder = ConversionRegistry::builder()
        .register::<String, String>(|s| Ok(s.clone()), |s| Ok(s.clone()))
        .register::<bool, String>(|b| Ok(b.to_string()), |s| Ok(s == "true"))
        .register::<char, String>(
            |c| Ok(c.to_string()),
            |s| s.chars().next().ok_or_else(|| FormatError::invalid_value("char", "empty string")),
        );

    let builder = textual::<i32>(builder);
    let builder = textual::<i64>(builder);
    let builder = textual::<u32>(builder);
    let builder = textual::<u64>(builder);
    let builder = textual::<f32>(builder);
    textual::<f64>(builder)
}

/// [`basic`] plus `Vec<u8>` / `Box<[u8]>` as standard padded base64.
#[must_use]
pub fn base64() -> ConversionRegistry {
    with_bytes(basic(), |bytes| STANDARD.encode(bytes), |text| {
        STANDARD.decode(text).map_err(|e| FormatError::invalid_value("base64 bytes", e))
    })
}

/// [`basic`] plus `Vec<u8>` / `Box<[u8]>` as lowercase hexadecimal.
#[must_use]
pub fn hex() -> ConversionRegistry {
    with_bytes(basic(), |bytes| ::hex::encode(bytes), |text| {
        ::hex::decode(text).map_err(|e| FormatError::invalid_value("hex bytes", e))
    })
}

fn textual<T>(builder: ConversionRegistryBuilder) -> ConversionRegistryBuilder
where
    T: FromStr + ToString + Any + Send,
    T::Err: Display,
{
    builder.register::<T, String>(
        |value| Ok(value.to_string()),
        |text| text.parse::<T>().map_err(|e| FormatError::invalid_value(type_name::<T>(), e)),
    )
}

fn with_bytes(
    builder: ConversionRegistryBuilder,
    encode: fn(&[u8]) -> String,
    decode: fn(&str) -> Result<Vec<u8>, FormatError>,
) -> ConversionRegistry {
    builder
        .register::<Vec<u8>, String>(move |bytes| Ok(encode(bytes)), move |text| decode(text))
        .register::<Box<[u8]>, String>(
            move |bytes| Ok(encode(bytes)),
            move |text| decode(text).map(Vec::into_boxed_slice),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_round_trip_through_text() {
        let registry = basic().build();

        let text: String = registry.convert(&-42_i32).unwrap();
        assert_eq!(text, "-42");
        assert_eq!(registry.convert::<String, i32>(&text).unwrap(), -42);

        let flag: String = registry.convert(&true).unwrap();
        assert!(registry.convert::<String, bool>(&flag).unwrap());

        let letter: String = registry.convert(&'z').unwrap();
        assert_eq!(registry.convert::<String, char>(&letter).unwrap(), 'z');
    }

    #[test]
    fn bool_is_true_only_for_exact_literal() {
        let registry = basic().build();
        for text in ["TRUE", "yes", "1", "false"] {
            assert!(!registry.convert::<String, bool>(&text.to_owned()).unwrap(), "{text}");
        }
    }

    #[test]
    fn char_takes_first_character() {
        let registry = basic().build();
        assert_eq!(registry.convert::<String, char>(&"xyz".to_owned()).unwrap(), 'x');
        assert!(registry.convert::<String, char>(&String::new()).is_err());
    }

    #[test]
    fn integer_parse_failure_is_invalid_value() {
        let err = basic().build().convert::<String, u32>(&"-1".to_owned()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidValue { target_type: "u32", .. }));
    }

    #[test]
    fn base64_profile_uses_padded_standard_alphabet() {
        let registry = base64();
        let text: String = registry.convert(&vec![0xfb_u8, 0xff]).unwrap();

        assert_eq!(text, "+/8=");
        assert_eq!(registry.convert::<String, Vec<u8>>(&text).unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn hex_profile_emits_lowercase_and_reads_any_case() {
        let registry = hex();
        let text: String = registry.convert(&vec![0xde_u8, 0xad, 0xbe, 0xef]).unwrap();

        assert_eq!(text, "deadbeef");
        let bytes: Box<[u8]> = registry.convert(&"DEADBEEF".to_owned()).unwrap();
        assert_eq!(&*bytes, &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn basic_profile_has_no_bytes() {
        assert!(!basic().build().supports::<Vec<u8>, String>());
        assert!(ByteEncoding::Hex.registry().supports::<Vec<u8>, String>());
    }
}
