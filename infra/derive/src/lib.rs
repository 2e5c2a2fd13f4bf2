#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the MCF workspace.
//!
//! * [`mcf_error`] turns a plain enum into a context-aware `thiserror` error.
//! * [`mcf_model`] declares the section schema of a struct so it can be mapped
//!   to and from MCF strings.
//!
//! ## Usage
//! Consumers normally reach these through `mcf-format` / `mcf-envelope` re-exports:
//! ```toml
//! [dependencies]
//! mcf-derive = { path = "../infra/derive" }
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Declares the ordered section layout of a struct.
///
/// Fields tagged with `#[mcf(order = N)]` become sections; untagged fields are
/// left out of the MCF string. The macro implements `mcf_format::McfModel` by
/// emitting an explicit `Schema` declaration, so ordering rules (unique,
/// contiguous, starting at `0`) are enforced the first time the type is mapped.
///
/// # Arguments
///
/// * `construct = "creator"` - (default) rebuilds the value through a generated
///   all-fields constructor; untagged fields receive `Default::default()`.
/// * `construct = "setters"` - starts from `Self::default()` and assigns each
///   tagged field; the struct must implement `Default`.
/// * `crate = "path"` - path to the `mcf_format` crate, for facades that re-export it.
///
/// Field options:
///
/// * `order = N` - zero-based section position.
/// * `name = "key"` - section key in named grammars; defaults to the field name.
///
/// # Errors
/// Emits a compile-time error for enums, tuple structs, unknown options, or
/// orders that are not non-negative integer literals.
///
/// # Example
///
/// ```rust,ignore
/// use mcf_format::prelude::*;
///
/// #[mcf_model]
/// struct Digest {
///     #[mcf(order = 0)]
///     identifier: String,
///     #[mcf(order = 1, name = "v")]
///     version: u32,
///     #[mcf(order = 2)]
///     hash: Vec<u8>,
/// }
/// ```
#[proc_macro_attribute]
pub fn mcf_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::model::expand(args.into(), input).into()
}

/// Turns an enum into a workspace error type.
///
/// # Features
///
/// * **Automatic Derives**: Adds `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait adding `.context()`
///   to `Result<T, Name>` and to results of wrapped source errors.
/// * **Source Conversions**: Implements `From<Source>` for variants made of exactly a
///   `source` field and a `context` field, so `?` lifts upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. `context` fields must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source (`source` field, `#[source]` or `#[from]`) must carry a `context`.
///
/// A private `format_context` helper is emitted for use in `#[error(...)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[mcf_derive::mcf_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Record {id} missing{}", format_context(.context))]
///     Missing { id: u64, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Reading record file")
/// }
/// ```
#[proc_macro_attribute]
pub fn mcf_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
