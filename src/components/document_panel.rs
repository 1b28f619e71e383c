//! Document Panel
//!
//! Plain-text editor backed by the shell's open/save dialogs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;

#[component]
pub fn DocumentPanel() -> impl IntoView {
    let (content, set_content) = signal(String::new());
    let (file_path, set_file_path) = signal::<Option<String>>(None);
    let (message, set_message) = signal(String::new());

    let open = move |_| {
        spawn_local(async move {
            match commands::open_file().await {
                Ok(reply) if reply.cancelled => {
                    set_message.set(reply.message.unwrap_or_default());
                }
                Ok(reply) => {
                    set_content.set(reply.content.unwrap_or_default());
                    set_file_path.set(reply.file_path);
                    set_message.set(String::new());
                }
                Err(e) => set_message.set(e.to_string()),
            }
        });
    };

    let save = move |_| {
        let text = content.get_untracked();
        spawn_local(async move {
            match commands::save_file(&text).await {
                Ok(reply) if reply.cancelled => {
                    set_message.set(reply.message.unwrap_or_default());
                }
                Ok(reply) => {
                    set_message.set(format!("Saved to {}", reply.file_path.clone().unwrap_or_default()));
                    set_file_path.set(reply.file_path);
                }
                Err(e) => set_message.set(e.to_string()),
            }
        });
    };

    view! {
        <section class="panel document-panel">
            <div class="document-header">
                <h2>{move || file_path.get().unwrap_or_else(|| "Untitled".to_string())}</h2>
                <div class="panel-actions">
                    <button on:click=open>"Open…"</button>
                    <button on:click=save>"Save…"</button>
                </div>
            </div>
            <textarea
                class="document-editor"
                prop:value=move || content.get()
                on:input=move |ev| set_content.set(event_target_value(&ev))
            ></textarea>
            <Show when=move || !message.get().is_empty()>
                <p class="panel-message">{move || message.get()}</p>
            </Show>
        </section>
    }
}
