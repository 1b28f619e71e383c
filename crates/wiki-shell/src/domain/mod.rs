//! Domain Layer
//!
//! Plain data crossing the isolation boundary, and the error taxonomy.
//! Nothing in here touches the OS.

mod backend;
mod command;
mod error;
mod settings;

pub use backend::{BackendState, BackendStatus, StartOutcome, StopOutcome};
pub use command::{CommandError, CommandResult};
pub use error::{ErrorKind, ShellError, ShellResult};
pub use settings::{Settings, SettingsSnapshot, Theme};
