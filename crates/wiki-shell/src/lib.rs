//! Wiki Desk Shell Core
//!
//! Everything the privileged shell does that does not need a webview:
//! - domain: error taxonomy, command results, settings record, backend status
//! - repository: settings persistence
//! - supervisor: backend process lifecycle
//! - platform: window and dialog capabilities supplied by the host
//! - registry: named command dispatch with uniform error capture
//! - handlers: the command surface wired onto the registry
//! - navigation: which URLs the webview may load

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod handlers;
pub mod navigation;
pub mod platform;
pub mod registry;
pub mod repository;
pub mod supervisor;

pub use config::{BackendConfig, Readiness, ShellConfig};
pub use domain::{CommandError, CommandResult, ErrorKind, ShellError, ShellResult};
pub use handlers::{build_registry, names, ShellContext};
pub use navigation::NavigationPolicy;
pub use registry::CommandRegistry;
pub use repository::SettingsRepository;
pub use supervisor::BackendSupervisor;
