//! Wiki Desk Shell
//!
//! Layered architecture:
//! - wiki-shell: command registry, handlers, settings, backend supervisor
//! - platform: Tauri-backed windows and dialogs for those handlers
//! - commands: the IPC entry points the webview can call

use std::sync::Arc;

use tauri::plugin::TauriPlugin;
use tauri::{AppHandle, Manager, RunEvent, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use wiki_shell::diagnostics::{current_command, panic_message, report_anomaly};
use wiki_shell::{
    build_registry, BackendSupervisor, CommandRegistry, NavigationPolicy, SettingsRepository, ShellConfig, ShellContext,
};

mod commands;
mod platform;

use platform::{TauriDialogs, TauriWindowHost};

const APP_NAME: &str = "WikiDesk";
const MAIN_WINDOW: &str = "main";

/// Application state shared across commands
pub struct AppState {
    pub registry: CommandRegistry,
    pub backend: Arc<BackendSupervisor>,
}

/// Per-user directories from the host, then environment overrides
fn resolve_config(app: &AppHandle) -> tauri::Result<ShellConfig> {
    let paths = app.path();
    let config = ShellConfig::from_dirs(
        &paths.app_config_dir()?,
        &paths.app_log_dir()?,
        &paths.resource_dir()?,
    );
    Ok(config.with_env_overrides())
}

/// Panics outside a command handler are logged and end the shell
///
/// The registry logs and recovers panics raised inside a handler.
fn install_panic_hook(app: AppHandle) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        if current_command().is_some() {
            return;
        }

        let location = info
            .location()
            .map(|l| format!("at {}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let _ = rolling_logger::error_in("panic", &panic_message(info.payload()), &location);
        app.exit(1);
    }));
}

/// Keeps every webview on the shell's own front-end
fn navigation_guard<R: Runtime>(policy: NavigationPolicy) -> TauriPlugin<R> {
    tauri::plugin::Builder::new("navigation-guard")
        .on_navigation(move |_webview, url| policy.allows(url.as_str()))
        .build()
}

fn show_fatal(app: &AppHandle, message: &str) {
    report_anomaly("startup", message);
    let handle = app.clone();
    app.dialog()
        .message(message)
        .title("Wiki Desk")
        .kind(MessageDialogKind::Error)
        .show(move |_| handle.exit(1));
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let context = tauri::generate_context!();
    let dev_url = context
        .config()
        .build
        .dev_url
        .as_ref()
        .filter(|_| tauri::is_dev())
        .map(|url| url.to_string());
    let policy = NavigationPolicy::new(dev_url.as_deref());

    let app = tauri::Builder::default()
        .plugin(navigation_guard(policy))
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
                    let _ = window.unminimize();
                    let _ = window.set_focus();
                }
            }))?;

            let handle = app.handle().clone();
            let config = resolve_config(&handle)?;

            rolling_logger::init_logger(&config.log_dir, APP_NAME)?;
            install_panic_hook(handle.clone());
            log::info!(
                "[{}] Shell starting, settings at {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                config.settings_path.display()
            );

            let ctx = ShellContext {
                windows: Arc::new(TauriWindowHost::new(handle.clone())),
                dialogs: Arc::new(TauriDialogs::new(handle.clone())),
                settings: Arc::new(SettingsRepository::new(config.settings_path.clone())),
                backend: Arc::new(BackendSupervisor::new(config.backend.clone())),
            };
            let registry = build_registry(&ctx)?;
            log::info!("Commands: {}", registry.names().join(", "));

            app.manage(AppState {
                registry,
                backend: ctx.backend.clone(),
            });

            if app.get_webview_window(MAIN_WINDOW).is_none() {
                show_fatal(&handle, "The main window could not be created.");
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::dispatch_command,
            commands::list_commands,
            commands::recent_log_lines,
        ])
        .build(context);

    let app = match app {
        Ok(app) => app,
        Err(err) => {
            if rolling_logger::error_in("startup", &err.to_string(), "").is_err() {
                eprintln!("error while building tauri application: {}", err);
            }
            std::process::exit(1);
        }
    };

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            // No backend process may outlive the shell.
            if let Some(state) = app_handle.try_state::<AppState>() {
                tauri::async_runtime::block_on(state.backend.shutdown());
            }
        }
    });
}
