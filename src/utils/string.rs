// ABOUTME: String helpers used by templates
// ABOUTME: Whitespace trimming and lowercase folding with typed and dynamic entry points

use serde_json::Value;

use super::error::{Result, UtilsError};

/// Remove leading and trailing whitespace
pub fn trim(s: &str) -> String {
    s.trim().to_string()
}

/// Lowercase every character; non-alphabetic characters pass through
pub fn lower_case(s: &str) -> String {
    s.to_lowercase()
}

/// `trim` for dynamically typed input. Non-strings are rejected, not coerced.
pub fn trim_value(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(trim)
        .ok_or_else(|| UtilsError::not_a_string(value))
}

/// `lower_case` for dynamically typed input. Non-strings are rejected.
pub fn lower_case_value(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(lower_case)
        .ok_or_else(|| UtilsError::not_a_string(value))
}
