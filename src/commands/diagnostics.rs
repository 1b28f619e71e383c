//! Diagnostics Commands
//!
//! Direct Tauri commands outside the registry.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call, to_js};
use crate::models::CommandError;

#[derive(Serialize)]
struct LogArgs {
    limit: usize,
}

pub async fn recent_log_lines(limit: usize) -> Result<Vec<String>, CommandError> {
    let result = call("recent_log_lines", to_js(&LogArgs { limit })?).await?;
    serde_wasm_bindgen::from_value(result).map_err(CommandError::bridge)
}

pub async fn list_commands() -> Result<Vec<String>, CommandError> {
    let result = call("list_commands", JsValue::NULL).await?;
    serde_wasm_bindgen::from_value(result).map_err(CommandError::bridge)
}
