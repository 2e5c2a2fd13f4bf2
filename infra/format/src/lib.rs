//! # MCF Format
//!
//! Sections, grammars, type conversion and metadata-driven mapping for
//! Modular Crypt Format strings such as `$AES-GCM$v=1$iv=...$<ciphertext>`.
//!
//! ## Layers
//!
//! * [`Section`] - one optional key plus a textual value.
//! * [`Grammar`] - [`Positional`] (`$a$b`) and [`Named`] (`a=1,b=2`) layouts.
//! * [`ConversionRegistry`] - bidirectional `A <-> String` converters, preloaded
//!   by the [`profile`] functions.
//! * [`Mapper`] - walks a [`McfModel`] schema to produce or consume sections.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mcf_format::prelude::*;
//!
//! #[mcf_model]
//! struct Digest {
//!     #[mcf(order = 0)]
//!     algorithm: String,
//!     #[mcf(order = 1)]
//!     hash: Vec<u8>,
//! }
//!
//! let mapper = Mapper::for_format(Format::McfHex);
//! let text = mapper.serialize(&Digest { algorithm: "SHA-256".into(), hash: vec![0xab] })?;
//! assert_eq!(text, "$SHA-256$ab");
//! ```

mod convert;
mod entity;
mod error;
mod grammar;
mod mapper;
pub mod profile;
mod schema;
mod section;

pub use convert::{ConversionRegistry, ConversionRegistryBuilder, TypeKey};
pub use error::{FormatError, FormatErrorExt};
pub use grammar::{Grammar, Named, Positional};
pub use mapper::{Format, Mapper};
pub use mcf_derive::mcf_model;
pub use profile::ByteEncoding;
pub use schema::{Arguments, FieldDescriptor, McfModel, Schema};
pub use section::Section;

pub mod prelude {
    pub use crate::{
        ByteEncoding, ConversionRegistry, Format, FormatError, FormatErrorExt, Grammar, Mapper,
        McfModel, Named, Positional, Section, mcf_model,
    };
}
