//! # Mapper
//!
//! Turns a [`McfModel`] value into sections and a composed string, and back.
//! A [`Mapper`] pairs a [`ConversionRegistry`] with a [`Grammar`]. Metadata for
//! each model type is validated once per process and shared by every mapper,
//! whatever its profile.

use crate::convert::ConversionRegistry;
use crate::entity;
use crate::error::FormatError;
use crate::grammar::{Grammar, Named, Positional};
use crate::profile;
use crate::schema::McfModel;
use crate::section::Section;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Preset registry/grammar pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Positional `$` grammar, bytes as standard base64.
    McfBase64,
    /// Positional `$` grammar, bytes as lowercase hex.
    McfHex,
    /// Named `k=v,` grammar, bytes as standard base64. Used for envelope parameters.
    Parameters,
}

struct MapperInner {
    registry: ConversionRegistry,
    grammar: Box<dyn Grammar>,
}

/// Cheap-to-clone handle over a registry and a grammar.
#[derive(Clone)]
pub struct Mapper {
    inner: Arc<MapperInner>,
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("grammar", &self.inner.grammar)
            .field("pairs", &self.inner.registry.len())
            .finish()
    }
}

impl Mapper {
    #[must_use]
    pub fn new(registry: ConversionRegistry, grammar: impl Grammar + 'static) -> Self {
        Self { inner: Arc::new(MapperInner { registry, grammar: Box::new(grammar) }) }
    }

    #[must_use]
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::McfBase64 => Self::new(profile::base64(), Positional),
            Format::McfHex => Self::new(profile::hex(), Positional),
            Format::Parameters => Self::new(profile::base64(), Named),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ConversionRegistry {
        &self.inner.registry
    }

    /// Converts every declared field of `value` to a section, in order.
    ///
    /// # Errors
    /// * [`FormatError::SerializationFailure`] If a field cannot be converted to text.
    /// * Any metadata validation error for `T` (e.g. [`FormatError::DuplicateOrder`]).
    pub fn to_sections<T: McfModel>(&self, value: &T) -> Result<Vec<Section>, FormatError> {
        entity::entity::<T>()?.to_sections(value, &self.inner.registry)
    }

    /// Rebuilds a `T` from sections, matched to fields by position.
    ///
    /// # Errors
    /// * [`FormatError::SectionCountMismatch`] If the count differs from the declared fields.
    /// * [`FormatError::SerializationFailure`] If a value cannot be converted or applied.
    /// * Any metadata validation error for `T`.
    pub fn from_sections<T: McfModel>(&self, sections: Vec<Section>) -> Result<T, FormatError> {
        entity::entity::<T>()?.from_sections(sections, &self.inner.registry)
    }

    /// Maps `value` to sections and composes them with the grammar.
    ///
    /// # Errors
    /// * Everything [`Mapper::to_sections`] returns.
    /// * [`FormatError::MalformedSection`] If a converted value violates the grammar.
    pub fn serialize<T: McfModel>(&self, value: &T) -> Result<String, FormatError> {
        let sections = self.to_sections(value)?;
        let composed = self.inner.grammar.compose(&sections)?;
        trace!(
            entity = std::any::type_name::<T>(),
            sections = sections.len(),
            "Serialized MCF entity"
        );
        Ok(composed)
    }

    /// Parses `composed` with the grammar and rebuilds a `T`.
    ///
    /// # Errors
    /// * [`FormatError::MalformedSection`] If the string violates the grammar.
    /// * Everything [`Mapper::from_sections`] returns.
    pub fn deserialize<T: McfModel>(&self, composed: &str) -> Result<T, FormatError> {
        let sections = self.inner.grammar.parse(composed)?;
        self.from_sections(sections)
    }
}
