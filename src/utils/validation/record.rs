//! Record-level validation for incoming patient payloads.
//!
//! Every field rule runs independently and all failures are collected, so
//! a client sees the full list of correctable problems in one response.
//! The cross-field emergency-contact rule runs only once every field rule
//! has passed, and is then reported on its own.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{Gender, PatientData};
use crate::utils::validation::{
    coerce, EmailInput, LinkInput, NameInput, TextInput, EMERGENCY_CONTACT_AGE,
    EMERGENCY_CONTACT_KEY, MAX_ALLERGIES,
};

/// A single failed check, tagged with the offending field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The set of validation failures for one payload.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    /// Returns the collected failures, in field evaluation order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {}", summary)
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a raw patient payload.
///
/// Returns the normalized record when every rule passes, or the full list
/// of field-tagged failures. The `id` key (and any other unknown key) in
/// the payload is ignored; identifier handling belongs to the caller.
///
/// The validator is a pure function: it performs no I/O and leaves the
/// payload untouched.
pub fn validate_patient(raw: &Value) -> Result<PatientData, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(body) = raw.as_object() else {
        errors.push("body", "payload must be a JSON object".to_owned());
        return Err(errors);
    };

    let name = match body.get("name").and_then(Value::as_str) {
        Some(value) => match NameInput::new(value) {
            Ok(name) => Some(name),
            Err(error) => {
                errors.push("name", error.to_string());
                None
            }
        },
        None => {
            errors.push("name", "is required and must be a string".to_owned());
            None
        }
    };

    let city = match body.get("city").and_then(Value::as_str) {
        Some(value) => match TextInput::new(value) {
            Ok(city) => Some(city),
            Err(error) => {
                errors.push("city", error.to_string());
                None
            }
        },
        None => {
            errors.push("city", "is required and must be a string".to_owned());
            None
        }
    };

    let age = match body.get("age") {
        Some(value) => match coerce::as_int(value) {
            Some(age) if (0..=i64::from(u32::MAX)).contains(&age) => Some(age as u32),
            _ => {
                errors.push("age", "must be a non-negative integer".to_owned());
                None
            }
        },
        None => {
            errors.push("age", "is required".to_owned());
            None
        }
    };

    let gender = match body.get("gender").and_then(Value::as_str) {
        Some(value) => match Gender::parse(value) {
            Some(gender) => Some(gender),
            None => {
                errors.push(
                    "gender",
                    format!("must be one of: {}", Gender::ALLOWED.join(", ")),
                );
                None
            }
        },
        None => {
            errors.push("gender", "is required".to_owned());
            None
        }
    };

    let height = positive_number(body, "height", &mut errors);
    let weight = positive_number(body, "weight", &mut errors);

    let email = match body.get("email").and_then(Value::as_str) {
        Some(value) => match EmailInput::new(value) {
            Ok(email) => Some(email),
            Err(error) => {
                errors.push("email", error.to_string());
                None
            }
        },
        None => {
            errors.push("email", "is required and must be a string".to_owned());
            None
        }
    };

    let married = match body.get("married") {
        Some(Value::Null) | None => Some(false),
        Some(value) => match value.as_bool() {
            Some(married) => Some(married),
            None => {
                errors.push("married", "must be a boolean".to_owned());
                None
            }
        },
    };

    let allergies = match body.get("allergies") {
        Some(Value::Null) | None => Some(None),
        Some(value) => match coerce::as_string_list(value) {
            Some(list) if list.len() <= MAX_ALLERGIES => Some(Some(list)),
            Some(_) => {
                errors.push(
                    "allergies",
                    format!("must not contain more than {} entries", MAX_ALLERGIES),
                );
                None
            }
            None => {
                errors.push("allergies", "must be a list of strings".to_owned());
                None
            }
        },
    };

    let contact_details = match body.get("contact_details") {
        Some(Value::Null) | None => Some(HashMap::new()),
        Some(value) => match coerce::as_string_map(value) {
            Some(map) => Some(map),
            None => {
                errors.push(
                    "contact_details",
                    "must be a mapping of strings to strings".to_owned(),
                );
                None
            }
        },
    };

    let linked_in = match body.get("linked_in") {
        Some(Value::Null) | None => Some(None),
        Some(value) => match value.as_str() {
            Some(link) => match LinkInput::new(link) {
                Ok(link) => Some(Some(link)),
                Err(error) => {
                    errors.push("linked_in", error.to_string());
                    None
                }
            },
            None => {
                errors.push("linked_in", "must be a string".to_owned());
                None
            }
        },
    };

    // Every None above pushed an error, so all slots are filled exactly
    // when no field-level rule failed.
    let (
        Some(name),
        Some(city),
        Some(age),
        Some(gender),
        Some(height),
        Some(weight),
        Some(email),
        Some(married),
        Some(allergies),
        Some(contact_details),
        Some(linked_in),
    ) = (
        name,
        city,
        age,
        gender,
        height,
        weight,
        email,
        married,
        allergies,
        contact_details,
        linked_in,
    )
    else {
        return Err(errors);
    };

    // Cross-field rule, evaluated only after all field-level rules passed
    if age > EMERGENCY_CONTACT_AGE && !contact_details.contains_key(EMERGENCY_CONTACT_KEY) {
        errors.push(
            "contact_details",
            format!(
                "an \"{}\" contact is required for patients over {} years old",
                EMERGENCY_CONTACT_KEY, EMERGENCY_CONTACT_AGE
            ),
        );
        return Err(errors);
    }

    Ok(PatientData {
        name,
        city,
        age,
        gender,
        height,
        weight,
        email,
        married,
        allergies,
        contact_details,
        linked_in,
    })
}

fn positive_number(
    body: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    match body.get(field) {
        Some(value) => match coerce::as_float(value) {
            Some(number) if number > 0.0 => Some(number),
            Some(_) => {
                errors.push(field, "must be greater than zero".to_owned());
                None
            }
            None => {
                errors.push(field, "must be a number".to_owned());
                None
            }
        },
        None => {
            errors.push(field, "is required".to_owned());
            None
        }
    }
}
