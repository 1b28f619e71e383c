//! Settings handlers

use serde::Deserialize;
use serde_json::{json, Value};

use super::{names, ShellContext};
use crate::domain::ShellResult;
use crate::registry::parse_args;

#[derive(Debug, Deserialize)]
struct SetArgs {
    #[serde(default)]
    settings: Value,
}

pub async fn get(ctx: ShellContext) -> ShellResult<Value> {
    Ok(serde_json::to_value(ctx.settings.get().await)?)
}

pub async fn set(ctx: ShellContext, args: Value) -> ShellResult<Value> {
    let args: SetArgs = parse_args(names::SETTINGS_SET, args)?;
    let saved = ctx.settings.update(args.settings).await?;
    log::info!("Settings saved to {}", ctx.settings.path().display());
    Ok(json!({ "settings": saved }))
}
