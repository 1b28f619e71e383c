//! File open/save handlers
//!
//! Paths only ever come from a native dialog the user drove; the front-end
//! never names a path itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use super::{names, ShellContext};
use crate::domain::{ShellError, ShellResult};
use crate::platform::{OPEN_FILTERS, SAVE_FILTERS};
use crate::registry::parse_args;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OpenOutcome {
    #[serde(rename_all = "camelCase")]
    Opened { content: String, file_path: String },
    Cancelled { cancelled: bool, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SaveOutcome {
    #[serde(rename_all = "camelCase")]
    Saved { file_path: String },
    Cancelled { cancelled: bool, message: String },
}

#[derive(Debug, Deserialize)]
struct SaveArgs {
    #[serde(default)]
    content: Option<String>,
}

pub async fn open_file(ctx: ShellContext) -> ShellResult<Value> {
    let Some(path) = ctx.dialogs.pick_file(OPEN_FILTERS).await else {
        return to_value(OpenOutcome::Cancelled {
            cancelled: true,
            message: "No file selected".to_string(),
        });
    };

    // The file can disappear between the dialog closing and the read.
    if !fs::try_exists(&path).await.unwrap_or(false) {
        return Err(ShellError::FileNotFound(path));
    }

    let content = fs::read_to_string(&path).await?;
    log::info!("Opened {}", path.display());
    to_value(OpenOutcome::Opened {
        content,
        file_path: path.display().to_string(),
    })
}

pub async fn save_file(ctx: ShellContext, args: Value) -> ShellResult<Value> {
    let args: SaveArgs = parse_args(names::FILE_SAVE, args)?;
    let content = match args.content {
        Some(content) if !content.is_empty() => content,
        _ => return Err(ShellError::EmptyContent),
    };

    let Some(path) = ctx.dialogs.pick_save_path(SAVE_FILTERS).await else {
        return to_value(SaveOutcome::Cancelled {
            cancelled: true,
            message: "No file path selected".to_string(),
        });
    };

    fs::write(&path, content).await?;
    log::info!("Saved {}", path.display());
    to_value(SaveOutcome::Saved {
        file_path: path.display().to_string(),
    })
}

fn to_value<T: Serialize>(outcome: T) -> ShellResult<Value> {
    Ok(serde_json::to_value(outcome)?)
}
