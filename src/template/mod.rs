// ABOUTME: Template module for rendering Handlebars with escaping-aware contexts
// ABOUTME: Provides text primitives, emptiness checks, helpers and the engine

pub mod context;
pub mod empty;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod text;

pub use context::TemplateContext;
pub use empty::is_empty;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use text::{escape_expression, escape_html, RenderableText};
