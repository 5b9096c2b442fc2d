// ABOUTME: Template context holding plain and pre-escaped values for rendering
// ABOUTME: Tags pre-escaped strings so the engine's output escaper can pass them through

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::error::{Result, TemplateError};
use super::text::{mark_pre_escaped, strip_markers, unmark, RenderableText};

/// Named values for a render. Plain strings are stored as given and escaped
/// when the template writes them out; pre-escaped strings carry a tag that
/// tells the engine's escaper to emit them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext {
    values: Map<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object; every string in it is plain
    pub fn from_json(data: &Value) -> Result<Self> {
        let map = data.as_object().ok_or_else(|| {
            TemplateError::InvalidContext(format!(
                "expected an object, found {}",
                crate::utils::error::kind_of(data)
            ))
        })?;

        let mut context = Self::new();
        for (key, value) in map {
            context.insert_json(key.clone(), value);
        }
        Ok(context)
    }

    pub fn insert_text(&mut self, key: impl Into<String>, text: &RenderableText) {
        match text {
            RenderableText::Plain(text) => self.insert_plain(key, text),
            RenderableText::PreEscaped(text) => self.insert_pre_escaped(key, text.as_str()),
        }
    }

    pub fn insert_plain(&mut self, key: impl Into<String>, text: &str) {
        self.values
            .insert(plain_key(key.into()), Value::String(strip_markers(text)));
    }

    pub fn insert_pre_escaped(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let text = text.into();
        self.values
            .insert(plain_key(key.into()), Value::String(mark_pre_escaped(&text)));
    }

    /// Insert a JSON value; strings and keys anywhere inside it are plain
    pub fn insert_json(&mut self, key: impl Into<String>, value: &Value) {
        self.values.insert(plain_key(key.into()), plain_json(value));
    }

    /// Add plain string variables
    pub fn extend_variables(&mut self, vars: &HashMap<String, String>) {
        for (key, value) in vars {
            self.insert_plain(key.clone(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// A top-level string entry with its plain or pre-escaped tag
    pub fn text(&self, key: &str) -> Option<RenderableText> {
        self.values.get(key)?.as_str().map(unmark)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert context to JSON for handlebars rendering. Pre-escaped
    /// strings keep their tag here; use `text` to read them back.
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

fn plain_key(key: String) -> String {
    strip_markers(&key)
}

fn plain_json(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(strip_markers(text)),
        Value::Array(items) => Value::Array(items.iter().map(plain_json).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (strip_markers(key), plain_json(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}
