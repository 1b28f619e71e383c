//! File Commands
//!
//! The shell picks the path through a native dialog; only content crosses.

use serde_json::{json, Value};

use super::dispatch;
use crate::models::{CommandError, FileReply};

pub async fn open_file() -> Result<FileReply, CommandError> {
    dispatch("file:open", Value::Null).await
}

pub async fn save_file(content: &str) -> Result<FileReply, CommandError> {
    dispatch("file:save", json!({ "content": content })).await
}
