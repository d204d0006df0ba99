//! Tolerant coercion from raw JSON values to typed values.
//!
//! Numeric fields accept JSON numbers as well as numeric strings.
//! Coercion only produces typed values; range and format checks belong to
//! validation proper.

use std::collections::HashMap;

use serde_json::Value;

/// Coerces a raw value to a signed integer.
/// Accepts JSON integers and strings holding an integer.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerces a raw value to a float.
/// Accepts JSON numbers (integer or float) and strings holding a number.
pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerces a raw value to a list of strings.
pub fn as_string_list(value: &Value) -> Option<Vec<String>> {
    let list = value.as_array()?;
    list.iter()
        .map(|entry| entry.as_str().map(str::to_owned))
        .collect()
}

/// Coerces a raw value to a mapping of strings to strings.
pub fn as_string_map(value: &Value) -> Option<HashMap<String, String>> {
    let object = value.as_object()?;
    let mut map = HashMap::with_capacity(object.len());

    for (key, entry) in object {
        map.insert(key.clone(), entry.as_str()?.to_owned());
    }

    Some(map)
}
