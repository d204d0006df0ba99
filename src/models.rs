//! Data model for the patient registry.
//!
//! A record is validated once at the boundary and treated as immutable
//! afterwards. The derived values (`bmi`, `verdict`) are never stored;
//! they are recomputed from the record on every read.

use std::collections::HashMap;

use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::validation::{EmailInput, LinkInput, NameInput, TextInput};

// Regex for patient identifiers
static PATIENT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,63}$").expect("Failed to compile patient id regex")
});

#[derive(Debug, Clone, Copy, Error)]
#[error("invalid patient id")]
pub struct InvalidPatientId;

/// Wrapper type for a patient identifier that has been validated.
///
/// Identifiers are the keys of the store; once a record is filed under an
/// id, the id never changes.
#[derive(
    Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, PartialOrd, Ord, Display,
)]
pub struct PatientId(String);

impl TryFrom<&str> for PatientId {
    type Error = InvalidPatientId;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        if PATIENT_ID_REGEX.is_match(id) {
            Ok(Self(id.to_owned()))
        } else {
            Err(InvalidPatientId)
        }
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Gender of a patient, restricted to the registry's fixed set.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display("male")]
    Male,
    #[display("female")]
    Female,
    #[display("others")]
    Others,
}

impl Gender {
    pub const ALLOWED: [&'static str; 3] = ["male", "female", "others"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "others" => Some(Self::Others),
            _ => None,
        }
    }
}

/// Classification band for a body mass index.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Display)]
pub enum Verdict {
    #[display("Underweight")]
    Underweight,
    #[display("Normal weight")]
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[display("Overweight")]
    Overweight,
    #[display("Obese")]
    Obese,
}

impl Verdict {
    /// Classifies a BMI value into its band.
    ///
    /// The 24.9..25.0 gap falls through to Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 24.9 {
            Self::NormalWeight
        } else if (25.0..29.9).contains(&bmi) {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Fields the patient listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub const ALLOWED: [&'static str; 3] = ["height", "weight", "bmi"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "height" => Some(Self::Height),
            "weight" => Some(Self::Weight),
            "bmi" => Some(Self::Bmi),
            _ => None,
        }
    }
}

/// Direction of a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// A validated patient record, as stored in the registry.
///
/// Construction goes through `utils::validation::record::validate_patient`;
/// records loaded back from the store file are trusted as already validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientData {
    pub name: NameInput,
    pub city: TextInput,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub email: EmailInput,
    #[serde(default)]
    pub married: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub contact_details: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<LinkInput>,
}

impl PatientData {
    /// Body mass index: weight divided by height squared, rounded to two
    /// decimals. Evaluates to 0.0 when the inputs cannot produce one.
    pub fn bmi(&self) -> f64 {
        if self.height > 0.0 && self.weight > 0.0 {
            round2(self.weight / (self.height * self.height))
        } else {
            0.0
        }
    }

    /// Classification of the current BMI.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_bmi(self.bmi())
    }

    /// Sort key for an allow-listed field. A value that cannot be produced
    /// sorts as 0.
    pub fn sort_key(&self, field: SortField) -> f64 {
        match field {
            SortField::Height => self.height,
            SortField::Weight => self.weight,
            SortField::Bmi => self.bmi(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> PatientData {
        PatientData {
            name: NameInput::new("Ananya Verma").unwrap(),
            city: TextInput::new("Guwahati").unwrap(),
            age: 28,
            gender: Gender::Female,
            height: 1.65,
            weight: 90.0,
            email: EmailInput::new("ananya@hdfc.com").unwrap(),
            married: false,
            allergies: None,
            contact_details: HashMap::new(),
            linked_in: None,
        }
    }

    #[test]
    fn test_valid_patient_ids() {
        let valid_cases = vec!["P001", "p1", "42", "patient-42", "a_b-c"];

        for id in valid_cases {
            assert!(
                PatientId::try_from(id).is_ok(),
                "Valid patient id {} was rejected !",
                id
            );
        }
    }

    #[test]
    fn test_invalid_patient_ids() {
        let binding = "a".repeat(65);
        let invalid_cases = vec![
            "",             // Empty
            "-P001",        // Leading separator
            "P 001",        // Whitespace
            "P001!",        // Special character
            binding.as_str(), // Too long
        ];

        for id in invalid_cases {
            assert!(
                PatientId::try_from(id).is_err(),
                "Invalid patient id {} was accepted !",
                id
            );
        }
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("others"), Some(Gender::Others));
        assert_eq!(Gender::parse("Male"), None);
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn test_bmi_rounding() {
        let patient = sample_patient();
        assert_eq!(patient.bmi(), 33.06);

        let mut patient = sample_patient();
        patient.weight = 70.5;
        assert_eq!(patient.bmi(), 25.9);
        assert_eq!(patient.verdict(), Verdict::Overweight);
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_bmi(16.0), Verdict::Underweight);
        assert_eq!(Verdict::from_bmi(18.5), Verdict::NormalWeight);
        assert_eq!(Verdict::from_bmi(22.0), Verdict::NormalWeight);
        assert_eq!(Verdict::from_bmi(25.0), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(27.5), Verdict::Overweight);
        assert_eq!(Verdict::from_bmi(29.9), Verdict::Obese);
        assert_eq!(Verdict::from_bmi(35.0), Verdict::Obese);
        // The band table has no entry for 24.9..25.0, so it lands on Obese
        assert_eq!(Verdict::from_bmi(24.95), Verdict::Obese);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::NormalWeight.to_string(), "Normal weight");
        assert_eq!(Verdict::Obese.to_string(), "Obese");
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!(SortField::parse("height"), Some(SortField::Height));
        assert_eq!(SortField::parse("weight"), Some(SortField::Weight));
        assert_eq!(SortField::parse("bmi"), Some(SortField::Bmi));
        assert_eq!(SortField::parse("name"), None);
        assert_eq!(SortField::parse("age"), None);

        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::parse("up"), None);
    }

    #[test]
    fn test_sort_keys_order_records() {
        let short = PatientData {
            height: 1.55,
            weight: 52.0,
            ..sample_patient()
        };
        let tall = PatientData {
            height: 1.85,
            weight: 80.0,
            ..sample_patient()
        };

        let mut records = vec![tall.clone(), short.clone()];
        records.sort_by(|a, b| {
            a.sort_key(SortField::Height)
                .total_cmp(&b.sort_key(SortField::Height))
        });
        assert_eq!(records, vec![short.clone(), tall.clone()]);

        records.sort_by(|a, b| {
            b.sort_key(SortField::Bmi)
                .total_cmp(&a.sort_key(SortField::Bmi))
        });
        assert_eq!(records[0], tall);
    }
}
