use std::fmt;

/// One unit of an MCF string: an optional key and a textual value.
///
/// Positional grammars ignore the key; named grammars require it. Validation
/// is the grammar's job, a `Section` is only a carrier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section {
    key: Option<String>,
    value: String,
}

impl Section {
    /// Creates a section with an optional key.
    #[must_use]
    pub fn new(key: Option<String>, value: impl Into<String>) -> Self {
        Self { key, value: value.into() }
    }

    /// Creates a keyed section, as used by named grammars.
    #[must_use]
    pub fn named(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: Some(key.into()), value: value.into() }
    }

    /// Creates a key-less section, as produced by positional parsing.
    #[must_use]
    pub fn positional(value: impl Into<String>) -> Self {
        Self { key: None, value: value.into() }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the section, returning its value.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{key}={}", self.value),
            None => f.write_str(&self.value),
        }
    }
}
