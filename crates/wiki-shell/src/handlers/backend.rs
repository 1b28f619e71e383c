//! Backend control handlers

use serde_json::{json, Value};

use super::ShellContext;
use crate::domain::{ShellResult, StartOutcome, StopOutcome};

/// Start on the port from the current settings
pub async fn start(ctx: ShellContext) -> ShellResult<Value> {
    let port = ctx.settings.get().await.settings.backend_port;
    match ctx.backend.start(port).await? {
        StartOutcome::Started { pid } => Ok(json!({
            "message": "Backend server started",
            "pid": pid,
        })),
        StartOutcome::AlreadyRunning => Ok(json!({
            "alreadyRunning": true,
            "message": "Backend server is already running",
        })),
    }
}

pub async fn stop(ctx: ShellContext) -> ShellResult<Value> {
    match ctx.backend.stop().await {
        StopOutcome::Stopped => Ok(json!({ "message": "Backend server stopped" })),
        StopOutcome::NotRunning => Ok(json!({
            "notRunning": true,
            "message": "Backend server is not running",
        })),
    }
}

pub async fn status(ctx: ShellContext) -> ShellResult<Value> {
    Ok(serde_json::to_value(ctx.backend.status().await)?)
}
