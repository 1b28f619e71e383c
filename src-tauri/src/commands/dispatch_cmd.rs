//! Dispatch Commands
//!
//! Tauri command names can't carry the `group:action` form, so the front-end
//! sends the name as an argument and gets the registry's result back as-is.

use serde_json::Value;
use tauri::State;
use wiki_shell::CommandResult;

use crate::AppState;

const DEFAULT_LOG_LINES: usize = 100;

/// Run one named command; handler failures come back inside the result
#[tauri::command]
pub async fn dispatch_command(
    state: State<'_, AppState>,
    name: String,
    args: Option<Value>,
) -> Result<CommandResult, String> {
    Ok(state.registry.invoke(&name, args.unwrap_or(Value::Null)).await)
}

#[tauri::command]
pub fn list_commands(state: State<'_, AppState>) -> Vec<String> {
    state.registry.names()
}

/// Tail of the rolling log, oldest first
#[tauri::command]
pub fn recent_log_lines(limit: Option<usize>) -> Vec<String> {
    rolling_logger::recent(limit.unwrap_or(DEFAULT_LOG_LINES))
}
