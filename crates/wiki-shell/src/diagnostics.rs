//! Failure reporting
//!
//! Every caught failure is written once, as a rolling log entry
//! `[timestamp] ERROR in <context>: <message>` followed by its cause chain.
//! Before the logger is installed the `log` facade carries it instead.

use std::any::Any;
use std::error::Error;
use std::future::Future;

use crate::domain::ShellError;

tokio::task_local! {
    static COMMAND: String;
}

pub fn report_failure(context: &str, err: &ShellError) {
    if rolling_logger::error_in(context, &err.to_string(), &error_chain(err)).is_err() {
        log::error!("{} failed: {}", context, err);
    }
}

/// Something unexpected that is not tied to an error value
pub fn report_anomaly(context: &str, message: &str) {
    if rolling_logger::error_in(context, message, "").is_err() {
        log::error!("{}: {}", context, message);
    }
}

/// Run `fut` as the body of command `name`
pub(crate) async fn within_command<F: Future>(name: &str, fut: F) -> F::Output {
    COMMAND.scope(name.to_string(), fut).await
}

/// Name of the command whose handler is running on this thread, if any
///
/// Panics raised here are caught by the registry; a panic hook can use this
/// to tell them apart from panics nothing will recover from.
pub fn current_command() -> Option<String> {
    COMMAND.try_with(|name| name.clone()).ok()
}

/// `caused by:` lines for each source below `err`
pub fn error_chain(err: &dyn Error) -> String {
    let mut lines = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    lines.join("\n")
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_lists_causes() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ShellError::InvalidArguments {
            command: "file:save".into(),
            source: bad_json,
        };
        let chain = error_chain(&err);
        assert!(chain.starts_with("caused by: EOF while parsing"));
        assert_eq!(error_chain(&ShellError::EmptyContent), "");
    }

    #[test]
    fn test_panic_message_variants() {
        let text: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(text.as_ref()), "static");

        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
