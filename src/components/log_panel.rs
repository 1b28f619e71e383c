//! Log Panel
//!
//! Tail of the shell's rolling log, fetched on demand.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

const LOG_LINES: usize = 50;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());
    let (expanded, set_expanded) = signal(false);

    let load = move || {
        spawn_local(async move {
            match commands::recent_log_lines(LOG_LINES).await {
                Ok(loaded) => set_lines.set(loaded),
                Err(e) => set_lines.set(vec![e.to_string()]),
            }
            if let Ok(names) = commands::list_commands().await {
                web_sys::console::log_1(&format!("[LOG] Commands: {}", names.join(", ")).into());
            }
        });
    };

    let toggle = move |_| {
        let now = !expanded.get_untracked();
        set_expanded.set(now);
        if now {
            load();
        }
    };

    view! {
        <section class="panel log-panel">
            <div class="document-header">
                <h2>"Log"</h2>
                <div class="panel-actions">
                    <button on:click=toggle>{move || if expanded.get() { "Hide" } else { "Show" }}</button>
                    <Show when=move || expanded.get()>
                        <button on:click=move |_| load()>"Refresh"</button>
                    </Show>
                </div>
            </div>
            <Show when=move || expanded.get()>
                <pre class="log-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </section>
    }
}
