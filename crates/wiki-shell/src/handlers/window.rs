//! Window control handlers

use std::sync::Arc;

use serde_json::{json, Value};

use super::ShellContext;
use crate::domain::{ShellError, ShellResult};
use crate::platform::NativeWindow;

fn focused(ctx: &ShellContext) -> ShellResult<Arc<dyn NativeWindow>> {
    ctx.windows.focused_window().ok_or(ShellError::NoFocusedWindow)
}

pub async fn minimize(ctx: ShellContext) -> ShellResult<Value> {
    focused(&ctx)?.minimize()?;
    Ok(Value::Null)
}

/// Maximize, or restore if already maximized; reports the new state
pub async fn toggle_maximize(ctx: ShellContext) -> ShellResult<Value> {
    let window = focused(&ctx)?;
    let maximized = if window.is_maximized()? {
        window.unmaximize()?;
        false
    } else {
        window.maximize()?;
        true
    };
    Ok(json!({ "maximized": maximized }))
}

pub async fn close(ctx: ShellContext) -> ShellResult<Value> {
    focused(&ctx)?.close()?;
    Ok(Value::Null)
}
