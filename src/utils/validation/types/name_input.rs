//! Represents a validated patient name.
//!
//! Names share the safety rules of short text fields and are additionally
//! normalized to uppercase, so the same person registered twice compares
//! equal regardless of how the name was typed.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TextInput;

/// A validated patient name, trimmed and stored uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct NameInput {
    // The validated, trimmed and upper-cased name
    name: String,
}

impl NameInput {
    /// Creates a new `NameInput` after validating the provided value.
    ///
    /// The value goes through the same checks as any short text input
    /// (trimming, length, control characters, HTML) and is then
    /// upper-cased.
    ///
    /// # Arguments
    /// * `name` - The raw name to validate
    pub fn new(name: &str) -> Result<Self> {
        let text = TextInput::new(name)?;

        Ok(Self {
            name: text.as_str().to_uppercase(),
        })
    }

    /// Returns the validated name as a string slice
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// Implements Display to allow printing the name
impl fmt::Display for NameInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Allows using NameInput wherever a string reference is needed
impl AsRef<str> for NameInput {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
