//! Represents all possible errors surfaced by the API

pub const VALIDATION_ERROR: &str = "Validation failed";

pub const NOT_FOUND_ERROR: &str = "Patient not found";

pub const CONFLICT_ERROR: &str = "Patient with this id already exists";

pub const ID_ERROR: &str = "A valid patient id is required";

pub const STORE_ERROR: &str = "Patient store unavailable";
