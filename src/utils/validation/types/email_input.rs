//! Represents a validated email address.
//!
//! This module provides a type-safe wrapper around email addresses that
//! ensures they meet standard email format requirements. It uses the
//! validator crate to perform validation according to HTML5 email
//! specifications, and additionally restricts the address to the
//! registry's allow-listed domains.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

use crate::utils::validation::{ALLOWED_EMAIL_DOMAINS, MAX_EMAIL_LENGTH};

/// A validated email address that is guaranteed to meet format requirements
/// and to belong to one of the allowed domains. This type can only be
/// constructed through validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EmailInput {
    // The validated and normalized email address
    email: String,
}

impl EmailInput {
    /// Creates a new `EmailInput` after validating the provided email string.
    ///
    /// The email address is trimmed of whitespace, validated against HTML5
    /// email format requirements and lower-cased. The domain — everything
    /// after the last `@` — must be one of the allowed domains.
    ///
    /// # Arguments
    /// * `email` - The raw email address to validate
    ///
    /// # Returns
    /// * `Ok(EmailInput)` if the email is valid
    /// * `Err` with a descriptive message if validation fails
    pub fn new(email: &str) -> Result<Self> {
        let email_trimmed = email.trim();

        // Check for empty input first
        if email_trimmed.is_empty() {
            bail!("must not be empty");
        }

        // Check maximum reasonable length
        if email_trimmed.len() > MAX_EMAIL_LENGTH {
            bail!("must not exceed {} characters", MAX_EMAIL_LENGTH);
        }

        // Validate email format
        if !email_trimmed.validate_email() {
            bail!("is not a valid email address");
        }

        // Convert to lowercase for consistency
        let normalized_email = email_trimmed.to_lowercase();

        // The domain is everything after the last '@'
        let domain = normalized_email.rsplit('@').next().unwrap_or_default();
        if !ALLOWED_EMAIL_DOMAINS.contains(&domain) {
            bail!(
                "domain must be one of: {}",
                ALLOWED_EMAIL_DOMAINS.join(", ")
            );
        }

        Ok(Self {
            email: normalized_email,
        })
    }

    /// Returns a string slice of the validated email address
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

/// Implements Display to allow printing the email address
impl fmt::Display for EmailInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Allows using EmailInput wherever a string reference is needed
impl AsRef<str> for EmailInput {
    fn as_ref(&self) -> &str {
        &self.email
    }
}
