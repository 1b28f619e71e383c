//! Frontend Models
//!
//! Mirrors of what the shell sends back through `dispatch_command`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Failure reported by the shell, or by the bridge itself
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandError {
    pub kind: String,
    pub message: String,
}

impl CommandError {
    /// The call never produced a shell result (IPC or decoding trouble)
    pub fn bridge(err: impl fmt::Display) -> Self {
        Self {
            kind: "Bridge".to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Wire form of every command result
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", bound = "T: DeserializeOwned")]
pub enum CommandResult<T> {
    Ok { data: T },
    Err { error: CommandError },
}

impl<T> CommandResult<T> {
    pub fn into_result(self) -> Result<T, CommandError> {
        match self {
            CommandResult::Ok { data } => Ok(data),
            CommandResult::Err { error } => Err(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: String,
    pub auto_save: bool,
    pub backend_port: u16,
    pub max_recent_files: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            auto_save: true,
            backend_port: 8000,
            max_recent_files: 10,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub settings: Settings,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedSettings {
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendStatus {
    pub running: bool,
    pub pid: Option<u32>,
    pub state: String,
    pub last_exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReply {
    pub message: String,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub already_running: bool,
    #[serde(default)]
    pub not_running: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaximizeReply {
    pub maximized: bool,
}

/// `file:open` and `file:save` share one shape; unused fields stay empty
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReply {
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
