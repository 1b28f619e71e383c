//! Window Commands

use serde_json::Value;

use super::dispatch;
use crate::models::{CommandError, MaximizeReply};

pub async fn minimize_window() -> Result<(), CommandError> {
    dispatch::<Value>("window:minimize", Value::Null).await.map(|_| ())
}

/// Returns whether the window is maximized afterwards
pub async fn toggle_maximize() -> Result<bool, CommandError> {
    let reply: MaximizeReply = dispatch("window:maximize", Value::Null).await?;
    Ok(reply.maximized)
}

pub async fn close_window() -> Result<(), CommandError> {
    dispatch::<Value>("window:close", Value::Null).await.map(|_| ())
}
