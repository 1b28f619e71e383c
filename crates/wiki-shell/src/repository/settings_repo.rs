//! Settings Repository
//!
//! One JSON file at a fixed per-user path. Reads never write; updates merge
//! over the stored record, sanitize, and replace the whole file.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use crate::diagnostics;
use crate::domain::{Settings, SettingsSnapshot, ShellError, ShellResult};

pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and sanitize the stored record; fails if it is missing or unreadable
    pub async fn load(&self) -> ShellResult<Settings> {
        let content = fs::read_to_string(&self.path).await?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(Settings::sanitize(map)),
            other => Err(ShellError::InvalidSettingsShape(format!(
                "stored settings at {} are not an object: {}",
                self.path.display(),
                other
            ))),
        }
    }

    /// The stored record, or the defaults tagged `is_default` if it can't be read
    pub async fn get(&self) -> SettingsSnapshot {
        match self.load().await {
            Ok(settings) => SettingsSnapshot { settings, is_default: false },
            Err(err) => {
                match &err {
                    ShellError::Io(io) if io.kind() == IoErrorKind::NotFound => {
                        log::info!("No settings at {}, using defaults", self.path.display());
                    }
                    _ => diagnostics::report_failure("settings-get-fallback", &err),
                }
                SettingsSnapshot {
                    settings: Settings::default(),
                    is_default: true,
                }
            }
        }
    }

    /// Merge `patch` over the current record, sanitize, and persist
    pub async fn update(&self, patch: Value) -> ShellResult<Settings> {
        let Value::Object(patch) = patch else {
            return Err(ShellError::InvalidSettingsShape(format!(
                "expected an object, got {}",
                json_type(&patch)
            )));
        };

        let current = match self.load().await {
            Ok(settings) => settings,
            Err(_) => Settings::default(),
        };
        let mut merged = current.into_map();
        merged.extend(patch);

        let validated = Settings::sanitize(merged);
        self.save(&validated).await?;
        Ok(validated)
    }

    /// Replace the stored record
    pub async fn save(&self, settings: &Settings) -> ShellResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
