// ABOUTME: Handlebars helper functions for template rendering
// ABOUTME: Exposes trim, lowercase, escaping, emptiness and object globbing to templates

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use serde_json::Value;

use super::empty::is_empty;
use super::text::{escape_expression, escape_html, unmark, RenderableText};
use crate::utils::{self, UtilsError};

// Helper output bypasses the registry's escape function, so every helper
// writes `RenderableText::render()`: plain text escaped, pre-escaped kept.

/// String parameter with its plain or pre-escaped tag
fn text_param(h: &Helper, helper: &str) -> std::result::Result<RenderableText, RenderError> {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new(format!("{} helper requires input parameter", helper)))?;

    value
        .as_str()
        .map(unmark)
        .ok_or_else(|| RenderError::new(format!("{} helper: {}", helper, UtilsError::not_a_string(value))))
}

/// Trim helper - removes surrounding whitespace
pub fn trim_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let trimmed = text_param(h, "trim")?.map(utils::trim);
    out.write(&trimmed.render())?;
    Ok(())
}

/// Lowercase helper
pub fn lowercase_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let lowered = text_param(h, "lowercase")?.map(utils::lower_case);
    out.write(&lowered.render())?;
    Ok(())
}

/// Escape helper - HTML-escapes plain values once, keeps pre-escaped text;
/// null and false render nothing
pub fn escape_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let escaped = match h.param(0).map(|v| v.value()) {
        Some(Value::String(text)) => unmark(text).render().into_owned(),
        other => escape_expression(other),
    };
    out.write(&escaped)?;
    Ok(())
}

/// Is-empty helper - writes "true" or "false"
pub fn is_empty_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let empty = match h.param(0).map(|v| v.value()) {
        Some(Value::String(text)) => unmark(text).as_str().is_empty(),
        other => is_empty(other),
    };
    out.write(&empty.to_string())?;
    Ok(())
}

/// Glob helper - writes the object paths matching a pattern
pub fn glob_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let object = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("glob helper requires object parameter"))?;

    let pattern = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("glob helper requires pattern parameter"))?;

    let separator = h.param(2).and_then(|v| v.value().as_str()).unwrap_or(", ");

    let paths = utils::glob_paths(object, pattern)
        .map_err(|e| RenderError::new(format!("glob helper: {}", e)))?;
    out.write(&escape_html(&paths.join(separator)))?;
    Ok(())
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    handlebars.register_helper("trim", Box::new(trim_helper));
    handlebars.register_helper("lowercase", Box::new(lowercase_helper));
    handlebars.register_helper("escape", Box::new(escape_helper));
    handlebars.register_helper("is_empty", Box::new(is_empty_helper));
    handlebars.register_helper("glob", Box::new(glob_helper));
}
