// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Renders templates against escaping-aware contexts with the built-in helpers

use handlebars::Handlebars;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::context::TemplateContext;
use super::error::{Result, TemplateError};
use super::helpers;
use super::text::{escape_output, strip_markers};

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all built-in helpers
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    /// Create an engine; in strict mode a missing variable is a render error
    pub fn with_strict_mode(strict: bool) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(strict);
        handlebars.set_dev_mode(false);

        // Plain text is escaped here, tagged pre-escaped spans pass through
        handlebars.register_escape_fn(escape_output);

        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Render a template string with the given context. `{{x}}` escapes plain
    /// text; `{{{x}}}` writes it raw. Pre-escaped values render verbatim either way.
    pub fn render(&self, template: &str, context: &TemplateContext) -> Result<String> {
        debug!(
            "Rendering template ({} bytes) with {} context values",
            template.len(),
            context.len()
        );
        self.handlebars
            .render_template(template, context)
            .map(|out| strip_markers(&out))
            .map_err(TemplateError::HandlebarsError)
    }

    /// Render a template string with JSON data; all strings in it are plain
    pub fn render_json(&self, template: &str, data: &JsonValue) -> Result<String> {
        let context = TemplateContext::from_json(data)?;
        self.render(template, &context)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }

    /// Check if a string contains template expressions
    pub fn has_templates(&self, text: &str) -> bool {
        text.contains("{{") && text.contains("}}")
    }

    /// Register a custom helper function
    pub fn register_helper<F>(&mut self, name: &str, helper: F)
    where
        F: handlebars::HelperDef + Send + Sync + 'static,
    {
        self.handlebars.register_helper(name, Box::new(helper));
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
