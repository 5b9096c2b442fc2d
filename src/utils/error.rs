// ABOUTME: Error types for the string and object globbing utilities
// ABOUTME: Reports malformed input handed to the dynamic entry points

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UtilsError {
    #[error("Expected a string, found {found}")]
    NotAString { found: String },

    #[error("Expected an object, found {found}")]
    NotAnObject { found: String },

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl UtilsError {
    pub fn not_a_string(value: &Value) -> Self {
        Self::NotAString {
            found: kind_of(value).to_string(),
        }
    }

    pub fn not_an_object(value: &Value) -> Self {
        Self::NotAnObject {
            found: kind_of(value).to_string(),
        }
    }
}

/// Short name of a JSON value's kind, used in error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, UtilsError>;
