// ABOUTME: Explicit emptiness predicate for template values
// ABOUTME: Replaces implicit falsy checks with a fixed truth table per JSON variant

use serde_json::Value;

/// Whether a template value counts as empty.
///
/// | value               | empty |
/// |---------------------|-------|
/// | missing, `null`     | yes   |
/// | `false`             | yes   |
/// | `true`              | no    |
/// | any number, `0` too | no    |
/// | `""`                | yes   |
/// | other strings       | no    |
/// | `[]`                | yes   |
/// | other arrays        | no    |
/// | any object, `{}` too| no    |
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(_)) => false,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(_)) => false,
    }
}
