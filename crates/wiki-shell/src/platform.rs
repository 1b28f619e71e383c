//! Host capabilities
//!
//! The shell never keeps window references around: windows come and go with
//! user action, so handlers ask the host for whichever one has focus at the
//! moment they run. Dialogs are likewise supplied by the host.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ShellResult;

/// One native top-level window
pub trait NativeWindow: Send + Sync {
    fn minimize(&self) -> ShellResult<()>;
    fn is_maximized(&self) -> ShellResult<bool>;
    fn maximize(&self) -> ShellResult<()>;
    fn unmaximize(&self) -> ShellResult<()>;
    fn close(&self) -> ShellResult<()>;
}

/// Window lookup by focus
pub trait WindowHost: Send + Sync {
    fn focused_window(&self) -> Option<Arc<dyn NativeWindow>>;
}

/// A named extension allow-list entry for file pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const OPEN_FILTERS: &[FileFilter] = &[
    FileFilter { name: "Markdown files", extensions: &["md", "markdown"] },
    FileFilter { name: "Text files", extensions: &["txt"] },
    FileFilter { name: "All files", extensions: &["*"] },
];

pub const SAVE_FILTERS: &[FileFilter] = &[
    FileFilter { name: "Markdown files", extensions: &["md"] },
    FileFilter { name: "Text files", extensions: &["txt"] },
];

/// Native file pickers; `None` means the user cancelled
#[async_trait]
pub trait FileDialogs: Send + Sync {
    async fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf>;

    async fn pick_save_path(&self, filters: &[FileFilter]) -> Option<PathBuf>;
}
