// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for hbs-helpers

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hbs-helpers")]
#[command(about = "Template helper utilities: trimming, case folding, escaping and object globbing")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove leading and trailing whitespace
    Trim {
        #[arg(help = "Text to trim")]
        text: String,
    },

    /// Convert text to lowercase
    Lower {
        #[arg(help = "Text to convert")]
        text: String,
    },

    /// HTML-escape text
    Escape {
        #[arg(help = "Text to escape")]
        text: String,
    },

    /// List the object paths of a JSON or YAML mapping
    Paths {
        #[arg(help = "Path to a JSON or YAML data file")]
        file: PathBuf,
    },

    /// Keep only the entries of a mapping whose path matches a pattern
    Glob {
        #[arg(help = "Path to a JSON or YAML data file")]
        file: PathBuf,

        #[arg(help = "Glob pattern, e.g. 'server/**' or '*/port'")]
        pattern: String,
    },

    /// Render a Handlebars template file
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(short, long, help = "JSON or YAML data file used as context")]
        data: Option<PathBuf>,

        #[arg(
            short = 'V',
            long = "var",
            help = "Plain template variable, escaped on render (key=value)"
        )]
        vars: Vec<String>,

        #[arg(
            long = "safe",
            help = "Pre-escaped template variable, rendered verbatim (key=value)"
        )]
        safe: Vec<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(vars: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut variables = HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}
