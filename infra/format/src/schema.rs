//! # Schema Declarations
//!
//! A [`Schema`] lists the fields of a type that map to sections, each with
//! an order, a key, a read accessor and (optionally) a write accessor, plus
//! the ways the type can be rebuilt:
//!
//! * a **creator**, receiving every converted field value in order through
//!   [`Arguments`];
//! * an **empty** constructor, after which each field is assigned through its
//!   write accessor.
//!
//! Declarations are not validated here. The mapper checks them once per type
//! when the type is first used (see [`crate::mapper`]).

use crate::convert::TypeKey;
use crate::error::FormatError;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// A type whose values can be mapped to and from ordered sections.
///
/// Implement by hand with [`Schema::new`] or generate with `#[mcf_model]`.
pub trait McfModel: Sized + 'static {
    /// Declares the section layout. Called at most once per successful
    /// metadata build; failed builds call it again on the next attempt.
    fn schema() -> Schema<Self>;
}

pub(crate) type FieldRef<'a> = &'a (dyn Any + 'static);
pub(crate) type ReadFn<T> = Arc<dyn for<'a> Fn(&'a T) -> FieldRef<'a> + Send + Sync>;
pub(crate) type WriteFn<T> =
    Arc<dyn Fn(&mut T, Box<dyn Any + Send>) -> Result<(), FormatError> + Send + Sync>;
pub(crate) type CreatorFn<T> =
    Arc<dyn Fn(&mut Arguments) -> Result<T, FormatError> + Send + Sync>;
pub(crate) type EmptyFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A single mapped field.
pub struct FieldDescriptor<T> {
    pub(crate) order: u32,
    pub(crate) name: &'static str,
    pub(crate) declared: TypeKey,
    pub(crate) read: ReadFn<T>,
    pub(crate) write: Option<WriteFn<T>>,
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            name: self.name,
            declared: self.declared,
            read: Arc::clone(&self.read),
            write: self.write.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("order", &self.order)
            .field("name", &self.name)
            .field("type", &self.declared.name())
            .field("writable", &self.write.is_some())
            .finish()
    }
}

impl<T: 'static> FieldDescriptor<T> {
    /// A field that can be read but not assigned.
    #[must_use]
    pub fn readonly<F, R>(order: u32, name: &'static str, read: R) -> Self
    where
        F: Any + Send,
        R: Fn(&T) -> &F + Send + Sync + 'static,
    {
        Self {
            order,
            name,
            declared: TypeKey::of::<F>(),
            read: erase_read(read),
            write: None,
        }
    }

    /// A field with both accessors, usable by setter-based reconstruction.
    #[must_use]
    pub fn writable<F, R, W>(order: u32, name: &'static str, read: R, write: W) -> Self
    where
        F: Any + Send,
        R: Fn(&T) -> &F + Send + Sync + 'static,
        W: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let mut descriptor = Self::readonly(order, name, read);
        let assign = move |entity: &mut T, value: Box<dyn Any + Send>| -> Result<(), FormatError> {
            let value = value.downcast::<F>().map_err(|_| {
                let expected = type_name::<F>();
                FormatError::from(format!("write accessor for `{name}` expected {expected}"))
            })?;
            write(entity, *value);
            Ok(())
        };
        descriptor.write = Some(Arc::new(assign));
        descriptor
    }

    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn declared_type(&self) -> TypeKey {
        self.declared
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.write.is_some()
    }
}

fn erase_read<T: 'static, F: Any>(
    read: impl Fn(&T) -> &F + Send + Sync + 'static,
) -> ReadFn<T> {
    fn bind<T, C: for<'a> Fn(&'a T) -> FieldRef<'a>>(read: C) -> C {
        read
    }
    Arc::new(bind(move |entity: &T| read(entity) as FieldRef<'_>))
}

/// Unvalidated layout declaration for `T`.
pub struct Schema<T> {
    pub(crate) fields: Vec<FieldDescriptor<T>>,
    pub(crate) creators: Vec<CreatorFn<T>>,
    pub(crate) empty: Option<EmptyFn<T>>,
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("entity", &type_name::<T>())
            .field("fields", &self.fields)
            .field("creators", &self.creators.len())
            .field("empty", &self.empty.is_some())
            .finish()
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self { fields: Vec::new(), creators: Vec::new(), empty: None }
    }
}

impl<T: 'static> Schema<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Declaration order does not matter; `order` does.
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor<T>) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Adds an all-fields constructor. Declaring more than one makes the
    /// schema ambiguous.
    #[must_use]
    pub fn creator(
        mut self,
        creator: impl Fn(&mut Arguments) -> Result<T, FormatError> + Send + Sync + 'static,
    ) -> Self {
        self.creators.push(Arc::new(creator));
        self
    }

    /// Sets the no-argument constructor used with write accessors.
    #[must_use]
    pub fn empty(mut self, empty: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.empty = Some(Arc::new(empty));
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }
}

/// Converted field values handed to a creator, in field order.
pub struct Arguments {
    entity: &'static str,
    values: std::vec::IntoIter<(&'static str, Box<dyn Any + Send>)>,
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("entity", &self.entity)
            .field("remaining", &self.values.len())
            .finish()
    }
}

impl Arguments {
    pub(crate) fn new(
        entity: &'static str,
        values: Vec<(&'static str, Box<dyn Any + Send>)>,
    ) -> Self {
        Self { entity, values: values.into_iter() }
    }

    /// Takes the next value.
    ///
    /// # Errors
    /// * [`FormatError::ConstructorArgument`] If no value is left or it is not an `F`.
    pub fn take<F: Any>(&mut self) -> Result<F, FormatError> {
        let entity = self.entity;
        let (name, value) = self.values.next().ok_or_else(|| FormatError::ConstructorArgument {
            entity,
            message: "no arguments left".into(),
            context: None,
        })?;

        value.downcast::<F>().map(|value| *value).map_err(|_| FormatError::ConstructorArgument {
            entity,
            message: format!("`{name}` is not a {}", type_name::<F>()).into(),
            context: None,
        })
    }

    /// Number of values not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
