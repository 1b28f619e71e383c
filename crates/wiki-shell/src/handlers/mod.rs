//! Command Handlers
//!
//! The complete command surface exposed to the front-end. Each handler is a
//! plain async fn over `ShellContext`; `build_registry` binds them by name.

mod backend;
mod files;
mod settings;
mod window;


use std::sync::Arc;

use crate::domain::ShellResult;
use crate::platform::{FileDialogs, WindowHost};
use crate::registry::CommandRegistry;
use crate::repository::SettingsRepository;
use crate::supervisor::BackendSupervisor;

pub use files::{OpenOutcome, SaveOutcome};

/// Wire names of every command
pub mod names {
    pub const WINDOW_MINIMIZE: &str = "window:minimize";
    pub const WINDOW_MAXIMIZE: &str = "window:maximize";
    pub const WINDOW_CLOSE: &str = "window:close";
    pub const FILE_OPEN: &str = "file:open";
    pub const FILE_SAVE: &str = "file:save";
    pub const BACKEND_START: &str = "backend:start";
    pub const BACKEND_STOP: &str = "backend:stop";
    pub const BACKEND_STATUS: &str = "backend:status";
    pub const SETTINGS_GET: &str = "settings:get";
    pub const SETTINGS_SET: &str = "settings:set";

    pub const ALL: &[&str] = &[
        WINDOW_MINIMIZE,
        WINDOW_MAXIMIZE,
        WINDOW_CLOSE,
        FILE_OPEN,
        FILE_SAVE,
        BACKEND_START,
        BACKEND_STOP,
        BACKEND_STATUS,
        SETTINGS_GET,
        SETTINGS_SET,
    ];
}

/// Capabilities and services the handlers run against
#[derive(Clone)]
pub struct ShellContext {
    pub windows: Arc<dyn WindowHost>,
    pub dialogs: Arc<dyn FileDialogs>,
    pub settings: Arc<SettingsRepository>,
    pub backend: Arc<BackendSupervisor>,
}

/// Register every command against `ctx`
pub fn build_registry(ctx: &ShellContext) -> ShellResult<CommandRegistry> {
    let mut registry = CommandRegistry::new();

    let c = ctx.clone();
    registry.register(names::WINDOW_MINIMIZE, move |_| window::minimize(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::WINDOW_MAXIMIZE, move |_| window::toggle_maximize(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::WINDOW_CLOSE, move |_| window::close(c.clone()))?;

    let c = ctx.clone();
    registry.register(names::FILE_OPEN, move |_| files::open_file(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::FILE_SAVE, move |args| files::save_file(c.clone(), args))?;

    let c = ctx.clone();
    registry.register(names::BACKEND_START, move |_| backend::start(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::BACKEND_STOP, move |_| backend::stop(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::BACKEND_STATUS, move |_| backend::status(c.clone()))?;

    let c = ctx.clone();
    registry.register(names::SETTINGS_GET, move |_| settings::get(c.clone()))?;
    let c = ctx.clone();
    registry.register(names::SETTINGS_SET, move |args| settings::set(c.clone(), args))?;

    log::debug!("Registered {} commands", registry.names().len());
    Ok(registry)
}
