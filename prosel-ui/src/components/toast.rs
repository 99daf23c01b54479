//! Toast Notification Component
//!
//! Shows the current notification from the global state.

use leptos::*;

use prosel::auth::{Level, Notification};

use crate::state::expect_state;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_state();

    view! {
        <div class="fixed bottom-4 right-4 z-50">
            {move || {
                state.toast.get().map(|shown| view! {
                    <ToastMessage notification=shown.notification on_close=move |_| state.clear_toast() />
                })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(
    notification: Notification,
    on_close: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    let (icon, bg_class) = match notification.level {
        Level::Success => ("✓", "bg-green-600"),
        Level::Error => ("✕", "bg-red-600"),
        Level::Info => ("ℹ", "bg-blue-600"),
    };

    view! {
        <div
            role="status"
            class=format!(
                "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <div class="flex-1">
                <p class="text-sm font-semibold">{notification.title}</p>
                <p class="text-sm">{notification.description}</p>
            </div>
            <button type="button" class="text-white/80 hover:text-white" on:click=on_close>
                "×"
            </button>
        </div>
    }
}
