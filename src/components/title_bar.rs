//! Custom Title Bar Component
//!
//! The window is frameless; this bar is the drag region and the controls.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

#[component]
pub fn TitleBar() -> impl IntoView {
    let (maximized, set_maximized) = signal(false);

    let minimize = move |_| {
        spawn_local(async {
            if let Err(e) = commands::minimize_window().await {
                web_sys::console::error_1(&format!("[TITLEBAR] {}", e).into());
            }
        });
    };

    let toggle_maximize = move |_| {
        spawn_local(async move {
            match commands::toggle_maximize().await {
                Ok(now) => set_maximized.set(now),
                Err(e) => web_sys::console::error_1(&format!("[TITLEBAR] {}", e).into()),
            }
        });
    };

    let close = move |_| {
        spawn_local(async {
            if let Err(e) = commands::close_window().await {
                web_sys::console::error_1(&format!("[TITLEBAR] {}", e).into());
            }
        });
    };

    view! {
        <div class="custom-titlebar">
            <div class="titlebar-drag-region" data-tauri-drag-region>
                <span class="titlebar-title">"Wiki Desk"</span>
            </div>
            <div class="titlebar-controls">
                <button class="titlebar-btn minimize" title="Minimize" on:click=minimize>
                    "─"
                </button>
                <button
                    class="titlebar-btn maximize"
                    title=move || if maximized.get() { "Restore" } else { "Maximize" }
                    on:click=toggle_maximize
                >
                    {move || if maximized.get() { "❐" } else { "☐" }}
                </button>
                <button class="titlebar-btn close" title="Close" on:click=close>
                    "✕"
                </button>
            </div>
        </div>
    }
}
