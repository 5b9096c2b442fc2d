// ABOUTME: Configuration management for the hbs-helpers application
// ABOUTME: Handles loading configuration from files and environment variable overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Treat missing template variables as errors
    #[serde(default)]
    pub strict_mode: bool,

    /// Plain variables added to every render
    #[serde(default)]
    pub template_vars: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => {
                return Err(anyhow::anyhow!("Config file not found: {}", p.display()));
            }
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config: Config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("hbs-helpers.yaml"),
            PathBuf::from("hbs-helpers.yml"),
            PathBuf::from(".hbs-helpers.yaml"),
            PathBuf::from(".hbs-helpers.yml"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".hbs-helpers").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Default path (may not exist)
        PathBuf::from("hbs-helpers.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("HBS_HELPERS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HBS_HELPERS_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(strict) = std::env::var("HBS_HELPERS_STRICT") {
            self.template.strict_mode = strict.parse()?;
        }

        Ok(())
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template.template_vars.extend(vars);
    }
}
