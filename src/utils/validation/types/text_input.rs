//! Provides a secure and validated short-text representation.
//!
//! This module ensures that free-text record fields meet safety
//! requirements by:
//! - Validating length constraints
//! - Checking for control characters that could be dangerous
//! - Preventing HTML injection
//! - Normalizing whitespace

use ammonia::is_html;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use validator::ValidateNonControlCharacter;

use crate::utils::validation::MAX_TEXT_LENGTH;

/// Represents a validated short text field, such as a city name.
/// This type can only be constructed through validation, ensuring that any
/// instance meets our safety and formatting requirements.
///
/// Records loaded back from the store deserialize without re-validation;
/// the store is trusted to hold previously validated values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TextInput {
    // The validated and normalized text content
    text_content: String,
}

impl TextInput {
    /// Creates a new `TextInput` after validating the provided value.
    ///
    /// The value is trimmed first; the length constraint applies to the
    /// trimmed form. Unicode is NFKC-normalized so that equal-looking
    /// values compare equal.
    ///
    /// # Arguments
    /// * `content` - The text content to validate
    pub fn new(content: &str) -> Result<Self> {
        // First, normalize whitespace by trimming
        let trimmed = content.trim();

        // Perform our validation checks in order of complexity
        if trimmed.is_empty() {
            bail!("must not be empty");
        }

        if trimmed.chars().count() > MAX_TEXT_LENGTH {
            bail!("must not exceed {} characters", MAX_TEXT_LENGTH);
        }

        if !trimmed.validate_non_control_character() {
            bail!("must not contain control characters");
        }

        if is_html(trimmed) {
            bail!("must not contain HTML");
        }

        // Normalize Unicode characters to ensure consistent representation
        let normalized = trimmed.nfkc().collect::<String>();

        Ok(Self {
            text_content: normalized,
        })
    }

    /// Returns the validated content as a string slice
    pub fn as_str(&self) -> &str {
        &self.text_content
    }

    /// Returns the length of the content in characters
    pub fn len(&self) -> usize {
        self.text_content.chars().count()
    }

    /// Returns whether the content is empty
    /// This should always return false since we validate against empty content
    pub fn is_empty(&self) -> bool {
        self.text_content.is_empty()
    }
}

/// Implements Display to allow printing the text content
impl fmt::Display for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_content)
    }
}

/// Allows using TextInput wherever a string reference is needed
impl AsRef<str> for TextInput {
    fn as_ref(&self) -> &str {
        &self.text_content
    }
}
