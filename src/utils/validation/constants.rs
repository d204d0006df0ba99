//! Constants used throughout the validation system

/// Maximum length for short text fields (name, city)
pub const MAX_TEXT_LENGTH: usize = 100;
/// Maximum length for an email address
pub const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum number of allergy entries on a record
pub const MAX_ALLERGIES: usize = 5;
/// Email domains accepted by the registry
pub const ALLOWED_EMAIL_DOMAINS: [&str; 2] = ["hdfc.com", "icici.com"];
/// Contact key that must be present for senior patients
pub const EMERGENCY_CONTACT_KEY: &str = "emergency";
/// Age above which an emergency contact becomes mandatory
pub const EMERGENCY_CONTACT_AGE: u32 = 60;
