//! Settings Panel

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::models::Settings;

const THEMES: &[&str] = &["light", "dark", "auto"];

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let settings = RwSignal::new(Settings::default());
    let (is_default, set_is_default) = signal(false);
    let (message, set_message) = signal(String::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_settings().await {
                Ok(snapshot) => {
                    settings.set(snapshot.settings);
                    set_is_default.set(snapshot.is_default);
                }
                Err(e) => set_message.set(e.to_string()),
            }
        });
    });

    let save = move |_| {
        let current = settings.get_untracked();
        spawn_local(async move {
            match commands::save_settings(&current).await {
                Ok(stored) => {
                    settings.set(stored);
                    set_is_default.set(false);
                    set_message.set("Settings saved".to_string());
                }
                Err(e) => set_message.set(e.to_string()),
            }
        });
    };

    view! {
        <section class="panel settings-panel">
            <h2>"Settings"</h2>
            <Show when=move || is_default.get()>
                <p class="panel-hint">"Using default settings"</p>
            </Show>
            <label>
                "Theme"
                <select
                    prop:value=move || settings.get().theme
                    on:change=move |ev| settings.update(|s| s.theme = event_target_value(&ev))
                >
                    {THEMES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                </select>
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || settings.get().auto_save
                    on:change=move |ev| settings.update(|s| s.auto_save = event_target_checked(&ev))
                />
                "Auto-save"
            </label>
            <label>
                "Backend port"
                <input
                    type="number"
                    min="1"
                    max="65535"
                    prop:value=move || settings.get().backend_port.to_string()
                    on:change=move |ev| {
                        if let Ok(port) = event_target_value(&ev).parse() {
                            settings.update(|s| s.backend_port = port);
                        }
                    }
                />
            </label>
            <label>
                "Recent files"
                <input
                    type="number"
                    min="0"
                    prop:value=move || settings.get().max_recent_files.to_string()
                    on:change=move |ev| {
                        if let Ok(n) = event_target_value(&ev).parse() {
                            settings.update(|s| s.max_recent_files = n);
                        }
                    }
                />
            </label>
            <div class="panel-actions">
                <button on:click=save>"Save settings"</button>
            </div>
            <Show when=move || !message.get().is_empty()>
                <p class="panel-message">{move || message.get()}</p>
            </Show>
        </section>
    }
}
