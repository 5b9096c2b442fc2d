// ABOUTME: Command implementations for the hbs-helpers CLI
// ABOUTME: Handles text helpers, object path listing, globbing and template rendering

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::config::Config;
use crate::template::{escape_html, TemplateContext, TemplateEngine};
use crate::utils;

pub fn trim_text(text: &str) -> Result<()> {
    println!("{}", utils::trim(text));
    Ok(())
}

pub fn lower_text(text: &str) -> Result<()> {
    println!("{}", utils::lower_case(text));
    Ok(())
}

pub fn escape_text(text: &str) -> Result<()> {
    println!("{}", escape_html(text));
    Ok(())
}

/// Print one object path per line
pub async fn list_paths(file: PathBuf) -> Result<()> {
    let data = load_data_file(&file).await?;
    let paths = utils::build_object_paths(&data)
        .with_context(|| format!("Cannot list paths of '{}'", file.display()))?;

    info!("Found {} object paths in {}", paths.len(), file.display());
    for path in paths {
        println!("{}", path);
    }
    Ok(())
}

/// Print the entries matching `pattern` as pretty JSON
pub async fn glob_file(file: PathBuf, pattern: &str) -> Result<()> {
    let data = load_data_file(&file).await?;
    let filtered = utils::glob_object(&data, pattern)
        .with_context(|| format!("Cannot glob '{}'", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}

/// Render a template file with data, plain variables and pre-escaped variables
pub async fn render_template(
    template_path: PathBuf,
    data_path: Option<PathBuf>,
    safe: HashMap<String, String>,
    config: &Config,
) -> Result<()> {
    info!("Rendering template: {}", template_path.display());

    let template = fs::read_to_string(&template_path)
        .await
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;

    let mut context = match data_path {
        Some(path) => {
            let data = load_data_file(&path).await?;
            TemplateContext::from_json(&data)
                .with_context(|| format!("Invalid data file '{}'", path.display()))?
        }
        None => TemplateContext::new(),
    };
    context.extend_variables(&config.template.template_vars);
    for (key, value) in safe {
        context.insert_pre_escaped(key, value);
    }

    let engine = TemplateEngine::with_strict_mode(config.template.strict_mode);
    let rendered = engine
        .render(&template, &context)
        .with_context(|| format!("Failed to render '{}'", template_path.display()))?;

    print!("{}", rendered);
    Ok(())
}

/// Load a mapping from a JSON file (`.json`) or a YAML file (anything else)
pub async fn load_data_file(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read data file '{}'", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let data: Value = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid YAML in '{}'", path.display()))?
    };
    Ok(data)
}
