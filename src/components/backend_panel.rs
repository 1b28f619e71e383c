//! Backend Panel
//!
//! Start/stop controls and a polled status line for the backend process.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::models::BackendStatus;

const POLL_MS: u32 = 2000;

#[component]
pub fn BackendPanel() -> impl IntoView {
    let (status, set_status) = signal(BackendStatus::default());
    let (message, set_message) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let refresh = move || {
        spawn_local(async move {
            match commands::backend_status().await {
                Ok(s) => set_status.set(s),
                Err(e) => set_message.set(e.to_string()),
            }
        });
    };

    // Poll while mounted
    spawn_local(async move {
        loop {
            if let Ok(s) = commands::backend_status().await {
                if set_status.try_set(s).is_some() {
                    break;
                }
            }
            TimeoutFuture::new(POLL_MS).await;
        }
    });

    let start = move |_| {
        set_busy.set(true);
        set_message.set("Starting backend…".to_string());
        spawn_local(async move {
            match commands::start_backend().await {
                Ok(reply) => set_message.set(reply.message),
                Err(e) => set_message.set(e.to_string()),
            }
            set_busy.set(false);
            refresh();
        });
    };

    let stop = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            match commands::stop_backend().await {
                Ok(reply) => set_message.set(reply.message),
                Err(e) => set_message.set(e.to_string()),
            }
            set_busy.set(false);
            refresh();
        });
    };

    let state_class = move || format!("backend-state {}", status.get().state);
    let details = move || {
        let s = status.get();
        let pid = s.pid.map(|p| format!("pid {}", p)).unwrap_or_else(|| "no process".to_string());
        match s.last_exit_code {
            Some(code) => format!("{} · last exit code {}", pid, code),
            None => pid,
        }
    };

    view! {
        <section class="panel backend-panel">
            <h2>"Backend"</h2>
            <div class="backend-status">
                <span class=state_class>{move || status.get().state}</span>
                <span class="backend-details">{details}</span>
            </div>
            <div class="panel-actions">
                <button on:click=start disabled=move || busy.get() || status.get().running>
                    "Start"
                </button>
                <button on:click=stop disabled=move || busy.get() || status.get().pid.is_none()>
                    "Stop"
                </button>
            </div>
            <Show when=move || !message.get().is_empty()>
                <p class="panel-message">{move || message.get()}</p>
            </Show>
        </section>
    }
}
