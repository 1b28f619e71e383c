//! UI Components

mod backend_panel;
mod document_panel;
mod log_panel;
mod settings_panel;
mod title_bar;

pub use backend_panel::BackendPanel;
pub use document_panel::DocumentPanel;
pub use log_panel::LogPanel;
pub use settings_panel::SettingsPanel;
pub use title_bar::TitleBar;
