// ABOUTME: Main library module for hbs-helpers
// ABOUTME: Exports string helpers, object globbing and the escaping-aware template engine

pub mod cli;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use template::{escape_expression, is_empty, RenderableText, TemplateContext, TemplateEngine};
pub use utils::{build_object_paths, glob_object, lower_case, trim, Pattern};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
