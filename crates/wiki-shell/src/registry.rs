//! Command Registry
//!
//! Maps command names to async handlers and is the single place where
//! handler failures are caught. Whatever a handler does, `invoke` hands back
//! a `CommandResult`; errors and panics are logged and turned into a
//! structured failure.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::diagnostics::{panic_message, report_failure, within_command};
use crate::domain::{CommandResult, ShellError, ShellResult};

type Handler = Arc<dyn Fn(Value) -> BoxFuture<'static, ShellResult<Value>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handler`; a name can only be bound once
    pub fn register<F, Fut>(&mut self, name: &str, handler: F) -> ShellResult<()>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ShellResult<Value>> + Send + 'static,
    {
        if self.handlers.contains_key(name) {
            return Err(ShellError::DuplicateCommand(name.to_string()));
        }
        self.handlers
            .insert(name.to_string(), Arc::new(move |args| handler(args).boxed()));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn invoke(&self, name: &str, args: Value) -> CommandResult {
        let Some(handler) = self.handlers.get(name).cloned() else {
            let err = ShellError::UnknownCommand(name.to_string());
            report_failure(name, &err);
            return CommandResult::failure(&err);
        };

        let outcome = AssertUnwindSafe(within_command(name, async move { handler(args).await }))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(data)) => {
                log::debug!("{} ok", name);
                CommandResult::success(data)
            }
            Ok(Err(err)) => {
                report_failure(name, &err);
                CommandResult::failure(&err)
            }
            Err(payload) => {
                let err = ShellError::Panicked(panic_message(payload.as_ref()));
                report_failure(name, &err);
                CommandResult::failure(&err)
            }
        }
    }
}

/// Deserialize a command's argument object; `null` counts as `{}`
pub fn parse_args<T: DeserializeOwned>(command: &str, args: Value) -> ShellResult<T> {
    let args = if args.is_null() { Value::Object(Map::new()) } else { args };
    serde_json::from_value(args).map_err(|source| ShellError::InvalidArguments {
        command: command.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::current_command;
    use crate::domain::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;
    use std::path::Path;
    use std::sync::OnceLock;
    use tempfile::TempDir;

    /// The process-wide rolling log, installed once for this test binary
    fn installed_log() -> &'static Path {
        static DIR: OnceLock<TempDir> = OnceLock::new();
        DIR.get_or_init(|| {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            rolling_logger::init_logger(dir.path(), "RegistryTest").expect("Failed to install logger");
            dir
        })
        .path()
    }

    fn echo_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry
            .register("test:echo", |args| async move { Ok::<Value, ShellError>(args) })
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_invoke_runs_handler() {
        let registry = echo_registry();
        let result = registry.invoke("test:echo", json!({"a": 1})).await;
        assert_eq!(result, CommandResult::success(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_unknown_command_is_structured() {
        let registry = echo_registry();
        for name in ["", "test:missing", "window:minimize", "TEST:ECHO"] {
            let result = registry.invoke(name, Value::Null).await;
            let error = result.error().expect("unknown names must fail");
            assert_eq!(error.kind, ErrorKind::UnknownCommand);
            assert!(error.message.contains(name));
        }
    }

    #[tokio::test]
    async fn test_handler_error_becomes_handler_failure() {
        let mut registry = CommandRegistry::new();
        registry
            .register("test:io", |_| async {
                Err::<Value, ShellError>(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire").into())
            })
            .unwrap();

        let error = registry.invoke("test:io", Value::Null).await.into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::HandlerFailure);
        assert_eq!(error.message, "disk on fire");
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let mut registry = CommandRegistry::new();
        registry
            .register("test:panic", |_| async {
                if true {
                    panic!("handler exploded");
                }
                Ok::<Value, ShellError>(Value::Null)
            })
            .unwrap();

        let result = registry.invoke("test:panic", Value::Null).await;
        let error = result.error().unwrap();
        assert_eq!(error.kind, ErrorKind::HandlerFailure);
        assert!(error.message.contains("handler exploded"));

        // The registry stays usable afterwards.
        assert!(!registry.invoke("test:missing", Value::Null).await.is_ok());
    }

    #[tokio::test]
    async fn test_typed_errors_keep_kind() {
        let mut registry = CommandRegistry::new();
        registry
            .register("test:empty", |_| async { Err::<Value, ShellError>(ShellError::EmptyContent) })
            .unwrap();

        let error = registry.invoke("test:empty", Value::Null).await.into_result().unwrap_err();
        assert_eq!(error.kind, ErrorKind::EmptyContent);
    }

    #[tokio::test]
    async fn test_failures_are_written_to_log_once() {
        let log_dir = installed_log();
        let mut registry = CommandRegistry::new();
        registry
            .register("test:logged", |_| async { Err::<Value, ShellError>(ShellError::NoFocusedWindow) })
            .unwrap();

        registry.invoke("test:logged", Value::Null).await;

        let content = std::fs::read_to_string(log_dir.join("RegistryTest.log")).unwrap();
        assert!(content.contains("] ERROR in test:logged: No focused window found\n"));
        assert_eq!(content.matches("test:logged").count(), 1);
    }

    #[tokio::test]
    async fn test_handlers_run_in_command_scope() {
        let mut registry = CommandRegistry::new();
        registry
            .register("test:scope", |_| async { Ok::<Value, ShellError>(json!(current_command())) })
            .unwrap();

        let result = registry.invoke("test:scope", Value::Null).await;
        assert_eq!(result, CommandResult::success(json!("test:scope")));
        assert_eq!(current_command(), None);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = echo_registry();
        let err = registry
            .register("test:echo", |_| async { Ok::<Value, ShellError>(Value::Null) })
            .unwrap_err();
        assert!(matches!(err, ShellError::DuplicateCommand(name) if name == "test:echo"));
        assert_eq!(registry.names(), vec!["test:echo".to_string()]);
    }

    #[test]
    fn test_parse_args() {
        #[derive(Deserialize)]
        struct Args {
            #[serde(default)]
            content: String,
        }

        let parsed: Args = parse_args("file:save", Value::Null).unwrap();
        assert_eq!(parsed.content, "");

        let err = parse_args::<Args>("file:save", json!({"content": 5})).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    }
}
