//! Settings Commands

use serde_json::{json, Value};

use super::dispatch;
use crate::models::{CommandError, SavedSettings, Settings, SettingsSnapshot};

pub async fn get_settings() -> Result<SettingsSnapshot, CommandError> {
    dispatch("settings:get", Value::Null).await
}

/// Returns the record as stored, after the shell's validation
pub async fn save_settings(settings: &Settings) -> Result<Settings, CommandError> {
    let reply: SavedSettings = dispatch("settings:set", json!({ "settings": settings })).await?;
    Ok(reply.settings)
}
