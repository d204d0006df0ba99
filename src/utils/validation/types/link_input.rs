//! Represents a validated web link.
//!
//! The link is kept in the raw string form it was supplied in; validation
//! only guarantees that the string parses as a URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A validated URL, such as a profile link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct LinkInput {
    // The validated link
    link: String,
}

impl LinkInput {
    /// Creates a new `LinkInput` after checking that the trimmed value
    /// parses as a URL.
    pub fn new(link: &str) -> Result<Self> {
        let trimmed = link.trim();

        Url::parse(trimmed).context("is not a valid URL")?;

        Ok(Self {
            link: trimmed.to_owned(),
        })
    }

    /// Returns the validated link as a string slice
    pub fn as_str(&self) -> &str {
        &self.link
    }
}

/// Implements Display to allow printing the link
impl fmt::Display for LinkInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.link)
    }
}

/// Allows using LinkInput wherever a string reference is needed
impl AsRef<str> for LinkInput {
    fn as_ref(&self) -> &str {
        &self.link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_links() {
        let valid_links = vec![
            "https://www.linkedin.com/in/johndoe/",
            "http://example.com",
            "https://example.com/path?query=1",
            "  https://example.com  ", // Should be trimmed
        ];

        for link in valid_links {
            let result = LinkInput::new(link);
            assert!(result.is_ok(), "Should accept valid link: {}", link);
        }
    }

    #[test]
    fn test_invalid_links() {
        let invalid_links = vec![
            "",               // Empty
            "not a url",
            "www.example.com", // Missing scheme
            "http//example.com",
        ];

        for link in invalid_links {
            let result = LinkInput::new(link);
            assert!(result.is_err(), "Should reject invalid link: {}", link);
        }
    }

    #[test]
    fn test_display_and_asref() {
        let link = LinkInput::new("https://example.com").unwrap();

        assert_eq!(format!("{}", link), "https://example.com");
        assert_eq!(link.as_ref(), "https://example.com");
    }
}
