//! Tauri Command Wrappers
//!
//! Every shell command goes through `dispatch_command`; the modules here
//! give each one a typed async function.

mod backend;
mod diagnostics;
mod files;
mod settings;
mod window;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::models::{CommandError, CommandResult};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

pub use backend::*;
pub use diagnostics::*;
pub use files::*;
pub use settings::*;
pub use window::*;

#[derive(Serialize)]
struct DispatchArgs<'a> {
    name: &'a str,
    args: Value,
}

/// Objects must cross as plain JS objects, not `Map`s
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, CommandError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(CommandError::bridge)
}

async fn call(cmd: &str, args: JsValue) -> Result<JsValue, CommandError> {
    invoke(cmd, args)
        .await
        .map_err(|e| CommandError::bridge(e.as_string().unwrap_or_else(|| format!("{:?}", e))))
}

/// Run a named shell command and decode its data
pub async fn dispatch<T: DeserializeOwned>(name: &str, args: Value) -> Result<T, CommandError> {
    let js_args = to_js(&DispatchArgs { name, args })?;
    let result = call("dispatch_command", js_args).await?;
    let result: CommandResult<T> = serde_wasm_bindgen::from_value(result).map_err(CommandError::bridge)?;
    result.into_result()
}
