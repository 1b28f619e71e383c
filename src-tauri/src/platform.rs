//! Tauri-backed window and dialog capabilities

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tauri::{AppHandle, Manager, WebviewWindow};
use tauri_plugin_dialog::{DialogExt, FileDialogBuilder};
use wiki_shell::platform::{FileDialogs, FileFilter, NativeWindow, WindowHost};
use wiki_shell::{ShellError, ShellResult};

fn window_err(err: tauri::Error) -> ShellError {
    ShellError::Window(err.to_string())
}

pub struct TauriWindow(WebviewWindow);

impl NativeWindow for TauriWindow {
    fn minimize(&self) -> ShellResult<()> {
        self.0.minimize().map_err(window_err)
    }

    fn is_maximized(&self) -> ShellResult<bool> {
        self.0.is_maximized().map_err(window_err)
    }

    fn maximize(&self) -> ShellResult<()> {
        self.0.maximize().map_err(window_err)
    }

    fn unmaximize(&self) -> ShellResult<()> {
        self.0.unmaximize().map_err(window_err)
    }

    fn close(&self) -> ShellResult<()> {
        self.0.close().map_err(window_err)
    }
}

/// Looks up whichever webview window currently has focus
pub struct TauriWindowHost {
    app: AppHandle,
}

impl TauriWindowHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl WindowHost for TauriWindowHost {
    fn focused_window(&self) -> Option<Arc<dyn NativeWindow>> {
        self.app
            .webview_windows()
            .into_values()
            .find(|window| window.is_focused().unwrap_or(false))
            .map(|window| Arc::new(TauriWindow(window)) as Arc<dyn NativeWindow>)
    }
}

pub struct TauriDialogs {
    app: AppHandle,
}

impl TauriDialogs {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn builder(&self, filters: &[FileFilter]) -> FileDialogBuilder<tauri::Wry> {
        filters
            .iter()
            .fold(self.app.dialog().file(), |builder, filter| {
                builder.add_filter(filter.name, filter.extensions)
            })
    }
}

/// Dialogs block their thread until the user answers
async fn run_dialog<F>(pick: F) -> Option<PathBuf>
where
    F: FnOnce() -> Option<tauri_plugin_dialog::FilePath> + Send + 'static,
{
    let picked = match tauri::async_runtime::spawn_blocking(pick).await {
        Ok(picked) => picked?,
        Err(err) => {
            log::error!("File dialog task failed: {}", err);
            return None;
        }
    };

    match picked.into_path() {
        Ok(path) => Some(path),
        Err(err) => {
            log::error!("Dialog returned an unusable path: {}", err);
            None
        }
    }
}

#[async_trait]
impl FileDialogs for TauriDialogs {
    async fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        let builder = self.builder(filters);
        run_dialog(move || builder.blocking_pick_file()).await
    }

    async fn pick_save_path(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        let builder = self.builder(filters);
        run_dialog(move || builder.blocking_save_file()).await
    }
}
