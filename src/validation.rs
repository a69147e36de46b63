//! Coercion of untrusted JSON values and structural checks of paginated payloads.
//!
//! Nothing here fails on bad input except [`parse_paginated`], which reports
//! why a payload does not have the paginated envelope shape.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::page::PaginatedResponse;

/// Reasons a payload is rejected as a paginated response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("paginated response must be a JSON object")]
    NotAnObject,
    #[error("field `{0}` is missing")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Renders `value` as a string, or `fallback` when it is absent or null.
///
/// Arrays are joined with commas; objects, numbers and booleans use their
/// JSON text.
pub fn sanitize_string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        None | Some(Value::Null) => fallback.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| sanitize_string(Some(item), ""))
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
    }
}

/// Numeric coercion of `value`, or `fallback` when it has no finite value.
pub fn sanitize_number(value: Option<&Value>, fallback: f64) -> f64 {
    let number = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                text.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(flag)) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    };

    number.filter(|n| n.is_finite()).unwrap_or(fallback)
}

/// Truthiness of `value`: null, `false`, `0` and `""` are false.
pub fn sanitize_boolean(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Non-negative whole count taken from `value`, or `fallback`.
pub fn sanitize_count(value: Option<&Value>, fallback: u64) -> u64 {
    let number = sanitize_number(value, f64::NAN);
    if number.is_finite() && number >= 0.0 {
        number.trunc() as u64
    } else {
        fallback
    }
}

fn count_field(
    fields: &Map<String, Value>,
    field: &'static str,
    fallback: u64,
) -> Result<u64, ValidationError> {
    match fields.get(field) {
        Some(value @ Value::Number(_)) => Ok(sanitize_count(Some(value), fallback)),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a number",
        }),
        None => Err(ValidationError::MissingField(field)),
    }
}

fn flag_field(fields: &Map<String, Value>, field: &'static str) -> Result<bool, ValidationError> {
    match fields.get(field) {
        Some(value @ Value::Bool(_)) => Ok(sanitize_boolean(Some(value))),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "a boolean",
        }),
        None => Err(ValidationError::MissingField(field)),
    }
}

/// Parses a raw payload into a [`PaginatedResponse`] envelope.
///
/// Every envelope field must be present with the right JSON type. Counts
/// that cannot be represented (negative values) fall back to `1` pages, `0`
/// elements, page `0` and size `10`. Items in `content` are left untouched.
pub fn parse_paginated(raw: Value) -> Result<PaginatedResponse<Value>, ValidationError> {
    let Value::Object(mut fields) = raw else {
        return Err(ValidationError::NotAnObject);
    };

    let content = match fields.remove("content") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "content",
                expected: "an array",
            });
        }
        None => return Err(ValidationError::MissingField("content")),
    };

    Ok(PaginatedResponse {
        content,
        total_elements: count_field(&fields, "totalElements", 0)?,
        total_pages: count_field(&fields, "totalPages", 1)?,
        number: count_field(&fields, "number", 0)?,
        size: count_field(&fields, "size", 10)?,
        first: flag_field(&fields, "first")?,
        last: flag_field(&fields, "last")?,
    })
}

/// Whether `data` has the shape of a paginated response.
pub fn validate_paginated_response(data: &Value) -> bool {
    parse_paginated(data.clone()).is_ok()
}
