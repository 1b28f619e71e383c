//! Wiki Desk Frontend App
//!
//! Title bar on top, the document editor on the left, shell controls on the right.

use leptos::prelude::*;

use crate::components::{BackendPanel, DocumentPanel, LogPanel, SettingsPanel, TitleBar};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app-shell">
            <TitleBar />
            <div class="app-layout">
                <DocumentPanel />
                <aside class="side-column">
                    <BackendPanel />
                    <SettingsPanel />
                    <LogPanel />
                </aside>
            </div>
        </div>
    }
}
