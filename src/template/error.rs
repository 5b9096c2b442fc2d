// ABOUTME: Error types for template engine operations
// ABOUTME: Covers syntax, context and helper failures raised while rendering

use thiserror::Error;

use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template syntax error: {0}")]
    SyntaxError(String),

    #[error("Invalid template context: {0}")]
    InvalidContext(String),

    #[error("Utility error: {0}")]
    Utils(#[from] UtilsError),

    #[error("Handlebars error: {0}")]
    HandlebarsError(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
