//! # Format Errors
//!
//! This module defines [`FormatError`], shared by the grammars, the conversion
//! registry and the mapper. Every variant is cheap to clone so that failed
//! metadata builds can be handed to every caller waiting on the same type.

use std::borrow::Cow;

/// A specialized error enum for MCF formatting, conversion and mapping failures.
#[mcf_derive::mcf_error]
#[derive(Clone)]
pub enum FormatError {
    /// A section violates the active grammar (blank, delimiter inside, missing `=`).
    #[error("Malformed section{}: {message}", format_context(.context))]
    MalformedSection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No converter is registered for the requested type pair.
    #[error(
        "No registered type converter from {source_type} to {target_type}{}",
        format_context(.context)
    )]
    UnsupportedConversion {
        source_type: &'static str,
        target_type: &'static str,
        context: Option<Cow<'static, str>>,
    },

    /// A registered converter rejected the value (bad digits, bad base64, ...).
    #[error("Invalid {target_type} value{}: {message}", format_context(.context))]
    InvalidValue {
        target_type: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The schema declares no fields.
    #[error("{entity} declares no serializable fields{}", format_context(.context))]
    NoSerializableFields { entity: &'static str, context: Option<Cow<'static, str>> },

    /// Two fields share the same order.
    #[error("{entity} has a collision at order {order}{}", format_context(.context))]
    DuplicateOrder { entity: &'static str, order: u32, context: Option<Cow<'static, str>> },

    /// Field orders skip a value or do not start at zero.
    #[error(
        "{entity} field orders are not contiguous: expected {expected}, found {found}{}",
        format_context(.context)
    )]
    NonContiguousOrder {
        entity: &'static str,
        expected: u32,
        found: u32,
        context: Option<Cow<'static, str>>,
    },

    /// More than one all-fields constructor is declared.
    #[error("{entity} declares {count} creators; expected at most one{}", format_context(.context))]
    AmbiguousConstructor {
        entity: &'static str,
        count: usize,
        context: Option<Cow<'static, str>>,
    },

    /// Neither a creator nor an empty constructor is declared.
    #[error("{entity} declares no creator and no empty constructor{}", format_context(.context))]
    MissingConstructor { entity: &'static str, context: Option<Cow<'static, str>> },

    /// Setter-based reconstruction hit a field without a write accessor.
    #[error("{entity}.{field} has no write accessor{}", format_context(.context))]
    MissingAccessor {
        entity: &'static str,
        field: &'static str,
        context: Option<Cow<'static, str>>,
    },

    /// A creator asked for an argument that is missing or of another type.
    #[error("Invalid creator argument for {entity}{}: {message}", format_context(.context))]
    ConstructorArgument {
        entity: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The number of sections differs from the number of declared fields.
    #[error(
        "{entity} expects {expected} sections but got {actual}{}",
        format_context(.context)
    )]
    SectionCountMismatch {
        entity: &'static str,
        expected: usize,
        actual: usize,
        context: Option<Cow<'static, str>>,
    },

    /// Converting or applying a single field failed.
    #[error("Failed to map {entity}.{field}{}: {source}", format_context(.context))]
    SerializationFailure {
        entity: &'static str,
        field: &'static str,
        source: Box<FormatError>,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal format error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FormatError {
    pub(crate) fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedSection { message: message.into(), context: None }
    }

    pub(crate) fn invalid_value(target_type: &'static str, message: impl ToString) -> Self {
        Self::InvalidValue { target_type, message: message.to_string().into(), context: None }
    }

    /// Walks [`FormatError::SerializationFailure`] wrappers down to the original failure.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::SerializationFailure { source, .. } = current {
            current = source;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_display() {
        let result: Result<(), FormatError> = Err(FormatError::malformed("value is blank"));
        let err = result.context("composing params").unwrap_err();

        assert_eq!(err.to_string(), "Malformed section (composing params): value is blank");
    }

    #[test]
    fn root_cause_unwraps_nested_failures() {
        let inner = FormatError::invalid_value("i32", "digit expected");
        let err = FormatError::SerializationFailure {
            entity: "Outer",
            field: "count",
            source: Box::new(inner.clone()),
            context: None,
        };

        assert!(matches!(err.root_cause(), FormatError::InvalidValue { target_type: "i32", .. }));
        assert!(err.to_string().starts_with("Failed to map Outer.count"));
    }
}
