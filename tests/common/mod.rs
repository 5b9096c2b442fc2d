// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides scratch directories and sample data files for CLI and library tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

/// The nested mapping used throughout the original helper tests
pub fn sample_data() -> Value {
    json!({
        "foo": "bar",
        "baz": {
            "foo2": "bar2"
        }
    })
}

/// A deeper mapping with mixed leaf types
pub fn service_data() -> Value {
    json!({
        "name": "checkout",
        "server": {
            "http": { "host": "0.0.0.0", "port": 8080 },
            "tls": { "enabled": false, "ciphers": ["a", "b"] }
        },
        "owners": [],
        "limits": { "cpu": 0, "memory": null }
    })
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_file(&self, name: &str, extension: &str) -> PathBuf {
        self.path().join(format!("{}.{}", name, extension))
    }

    pub async fn create_json_file(&self, name: &str, data: &Value) -> PathBuf {
        let path = self.data_file(name, "json");
        let contents = serde_json::to_string_pretty(data).expect("Failed to serialize data");
        fs::write(&path, contents)
            .await
            .expect("Failed to write JSON file");
        path
    }

    pub async fn create_yaml_file(&self, name: &str, data: &Value) -> PathBuf {
        let path = self.data_file(name, "yaml");
        let contents = serde_yaml::to_string(data).expect("Failed to serialize data");
        fs::write(&path, contents)
            .await
            .expect("Failed to write YAML file");
        path
    }

    pub async fn create_template_file(&self, name: &str, template: &str) -> PathBuf {
        let path = self.data_file(name, "hbs");
        fs::write(&path, template)
            .await
            .expect("Failed to write template file");
        path
    }
}
