//! Command results as they cross the isolation boundary
//!
//! Wire form:
//! `{"status":"ok","data":...}` or
//! `{"status":"err","error":{"kind":"...","message":"..."}}`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ErrorKind, ShellError};

/// Structured failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ShellError> for CommandError {
    fn from(err: &ShellError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommandResult {
    Ok { data: Value },
    Err { error: CommandError },
}

impl CommandResult {
    pub fn success(data: Value) -> Self {
        CommandResult::Ok { data }
    }

    pub fn failure(err: &ShellError) -> Self {
        CommandResult::Err { error: err.into() }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CommandResult::Ok { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            CommandResult::Ok { data } => Some(data),
            CommandResult::Err { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CommandError> {
        match self {
            CommandResult::Ok { .. } => None,
            CommandResult::Err { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, CommandError> {
        match self {
            CommandResult::Ok { data } => Ok(data),
            CommandResult::Err { error } => Err(error),
        }
    }
}
