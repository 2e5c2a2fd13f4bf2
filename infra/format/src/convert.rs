//! # Type Conversion Registry
//!
//! A table of bidirectional converters keyed by `(source, target)` type pairs.
//! Registering `(A, B)` always installs both `A -> B` and `B -> A`, so any
//! supported value can be turned into a section string and back.
//!
//! The table is assembled once through [`ConversionRegistryBuilder`] and is
//! immutable afterwards; cloning a [`ConversionRegistry`] shares it.

use crate::error::FormatError;
use fxhash::FxHashMap;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime identity of a type together with its name for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

type Converter =
    Arc<dyn Fn(&dyn Any) -> Result<Box<dyn Any + Send>, FormatError> + Send + Sync>;

/// Immutable bidirectional converter table.
#[derive(Clone)]
pub struct ConversionRegistry {
    converters: Arc<FxHashMap<(TypeKey, TypeKey), Converter>>,
}

impl fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self
            .converters
            .keys()
            .map(|(from, to)| format!("{} -> {}", from.name, to.name))
            .collect();
        pairs.sort_unstable();
        f.debug_struct("ConversionRegistry").field("pairs", &pairs).finish()
    }
}

impl ConversionRegistry {
    /// Returns an empty [`ConversionRegistryBuilder`].
    #[must_use]
    pub fn builder() -> ConversionRegistryBuilder {
        ConversionRegistryBuilder::default()
    }

    /// Converts `value` to `B` using the registered `A -> B` converter.
    ///
    /// # Errors
    /// * [`FormatError::UnsupportedConversion`] If no converter is registered for the pair.
    /// * [`FormatError::InvalidValue`] If the converter rejects the value.
    pub fn convert<A: Any, B: Any>(&self, value: &A) -> Result<B, FormatError> {
        let converted = self.convert_erased(value, TypeKey::of::<A>(), TypeKey::of::<B>())?;
        converted.downcast::<B>().map(|boxed| *boxed).map_err(|_| {
            FormatError::from(format!("converter for {} produced a foreign type", type_name::<B>()))
        })
    }

    /// Type-erased conversion used by the mapper, where field types are only
    /// known as [`TypeKey`]s.
    ///
    /// # Errors
    /// * [`FormatError::UnsupportedConversion`] If no converter is registered for the pair.
    /// * [`FormatError::InvalidValue`] If the converter rejects the value.
    /// * [`FormatError::Internal`] If `value` is not of type `from`.
    pub fn convert_erased(
        &self,
        value: &dyn Any,
        from: TypeKey,
        to: TypeKey,
    ) -> Result<Box<dyn Any + Send>, FormatError> {
        let converter = self.converters.get(&(from, to)).ok_or(
            FormatError::UnsupportedConversion {
                source_type: from.name,
                target_type: to.name,
                context: None,
            },
        )?;
        converter(value)
    }

    /// Returns `true` when `A -> B` is registered.
    #[must_use]
    pub fn supports<A: Any, B: Any>(&self) -> bool {
        self.converters.contains_key(&(TypeKey::of::<A>(), TypeKey::of::<B>()))
    }

    /// Number of directed pairs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Reopens the table for extension without touching this instance.
    #[must_use]
    pub fn to_builder(&self) -> ConversionRegistryBuilder {
        ConversionRegistryBuilder { converters: (*self.converters).clone() }
    }
}

/// Collects converter pairs before freezing them into a [`ConversionRegistry`].
#[derive(Default)]
#[must_use = "Builder must be finished with `build`"]
pub struct ConversionRegistryBuilder {
    converters: FxHashMap<(TypeKey, TypeKey), Converter>,
}

impl fmt::Debug for ConversionRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRegistryBuilder").field("pairs", &self.converters.len()).finish()
    }
}

impl ConversionRegistryBuilder {
    /// Registers `A <-> B`. A later registration for the same pair replaces the earlier one.
    pub fn register<A, B>(
        mut self,
        forward: impl Fn(&A) -> Result<B, FormatError> + Send + Sync + 'static,
        backward: impl Fn(&B) -> Result<A, FormatError> + Send + Sync + 'static,
    ) -> Self
    where
        A: Any + Send,
        B: Any + Send,
    {
        self.converters.insert((TypeKey::of::<A>(), TypeKey::of::<B>()), erase(forward));
        self.converters.insert((TypeKey::of::<B>(), TypeKey::of::<A>()), erase(backward));
        self
    }

    /// Freezes the table.
    #[must_use]
    pub fn build(self) -> ConversionRegistry {
        ConversionRegistry { converters: Arc::new(self.converters) }
    }
}

fn erase<A, B>(convert: impl Fn(&A) -> Result<B, FormatError> + Send + Sync + 'static) -> Converter
where
    A: Any,
    B: Any + Send,
{
    Arc::new(move |value: &dyn Any| {
        let value = value.downcast_ref::<A>().ok_or_else(|| {
            FormatError::from(format!("converter expected a {} value", type_name::<A>()))
        })?;
        convert(value).map(|converted| Box::new(converted) as Box<dyn Any + Send>)
    })
}
