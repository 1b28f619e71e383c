//! Backend Commands

use serde_json::Value;

use super::dispatch;
use crate::models::{BackendReply, BackendStatus, CommandError};

pub async fn start_backend() -> Result<BackendReply, CommandError> {
    dispatch("backend:start", Value::Null).await
}

pub async fn stop_backend() -> Result<BackendReply, CommandError> {
    dispatch("backend:stop", Value::Null).await
}

pub async fn backend_status() -> Result<BackendStatus, CommandError> {
    dispatch("backend:status", Value::Null).await
}
