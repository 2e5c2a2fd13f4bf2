//! # Grammars
//!
//! Two textual layouts for a sequence of [`Section`]s:
//!
//! * [`Positional`] - `$v1$v2$v3`, keys are ignored.
//! * [`Named`] - `k1=v1,k2=v2`, keys are mandatory and split at the first `=`.
//!
//! Both reject blank values and values containing their own delimiter, on the
//! way out and on the way back in.

use crate::error::FormatError;
use crate::section::Section;
use std::fmt::Debug;

const POSITIONAL_DELIMITER: char = '$';
const PAIR_DELIMITER: char = ',';
const KEY_VALUE_DELIMITER: char = '=';

/// A reversible mapping between sections and a single string.
pub trait Grammar: Debug + Send + Sync {
    /// Joins sections into a string, validating every section first.
    ///
    /// # Errors
    /// * [`FormatError::MalformedSection`] If any section violates the grammar.
    fn compose(&self, sections: &[Section]) -> Result<String, FormatError>;

    /// Splits a string back into sections. Blank tokens are skipped.
    ///
    /// # Errors
    /// * [`FormatError::MalformedSection`] If a token violates the grammar.
    fn parse(&self, composed: &str) -> Result<Vec<Section>, FormatError>;
}

/// `$`-prefixed positional sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Positional;

/// `key=value` pairs separated by `,`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Named;

impl Grammar for Positional {
    fn compose(&self, sections: &[Section]) -> Result<String, FormatError> {
        let capacity = sections.iter().map(|section| section.value().len() + 1).sum();
        let mut composed = String::with_capacity(capacity);

        for (index, section) in sections.iter().enumerate() {
            check_value(section.value(), POSITIONAL_DELIMITER, index)?;
            composed.push(POSITIONAL_DELIMITER);
            composed.push_str(section.value());
        }

        Ok(composed)
    }

    fn parse(&self, composed: &str) -> Result<Vec<Section>, FormatError> {
        composed
            .split(POSITIONAL_DELIMITER)
            .filter(|token| !is_blank(token))
            .enumerate()
            .map(|(index, token)| {
                check_value(token, POSITIONAL_DELIMITER, index)?;
                Ok(Section::positional(token))
            })
            .collect()
    }
}

impl Grammar for Named {
    fn compose(&self, sections: &[Section]) -> Result<String, FormatError> {
        let mut composed = String::new();

        for (index, section) in sections.iter().enumerate() {
            let key = section.key().ok_or_else(|| {
                FormatError::malformed(format!("section {index} has no key"))
            })?;
            check_key(key, index)?;
            check_value(section.value(), PAIR_DELIMITER, index)?;

            if index > 0 {
                composed.push(PAIR_DELIMITER);
            }
            composed.push_str(key);
            composed.push(KEY_VALUE_DELIMITER);
            composed.push_str(section.value());
        }

        Ok(composed)
    }

    fn parse(&self, composed: &str) -> Result<Vec<Section>, FormatError> {
        composed
            .split(PAIR_DELIMITER)
            .filter(|token| !is_blank(token))
            .enumerate()
            .map(|(index, token)| {
                let (key, value) = token.split_once(KEY_VALUE_DELIMITER).ok_or_else(|| {
                    FormatError::malformed(format!("section {index} is missing `=`"))
                })?;
                check_key(key, index)?;
                check_value(value, PAIR_DELIMITER, index)?;
                Ok(Section::named(key, value))
            })
            .collect()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_value(value: &str, delimiter: char, index: usize) -> Result<(), FormatError> {
    if is_blank(value) {
        return Err(FormatError::malformed(format!("section {index} has a blank value")));
    }
    if value.contains(delimiter) {
        return Err(FormatError::malformed(format!(
            "section {index} value contains the delimiter `{delimiter}`"
        )));
    }
    Ok(())
}

fn check_key(key: &str, index: usize) -> Result<(), FormatError> {
    if is_blank(key) {
        return Err(FormatError::malformed(format!("section {index} has a blank key")));
    }
    if key.contains([KEY_VALUE_DELIMITER, PAIR_DELIMITER]) {
        return Err(FormatError::malformed(format!(
            "section {index} key contains `{KEY_VALUE_DELIMITER}` or `{PAIR_DELIMITER}`"
        )));
    }
    Ok(())
}
