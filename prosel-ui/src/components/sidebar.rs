//! Sidebar Component
//!
//! Panel selection for the dashboard, followed by the logout button.

use leptos::*;

use prosel::shell::{Dashboard, PanelKind};

#[component]
pub fn Sidebar(dashboard: RwSignal<Dashboard>, #[prop(into)] on_logout: Callback<()>) -> impl IntoView {
    view! {
        <aside class="w-64 bg-gray-800 min-h-screen p-4 flex flex-col space-y-2">
            <span class="text-xl font-bold text-white mb-4">"Prosel"</span>
            {PanelKind::SIDEBAR
                .into_iter()
                .map(|kind| view! { <SidebarButton dashboard=dashboard kind=kind /> })
                .collect_view()}
            <button
                type="button"
                on:click=move |_| on_logout.call(())
                class="mt-auto px-4 py-2 rounded-lg text-left text-red-300 hover:bg-gray-700"
            >
                "Logout"
            </button>
        </aside>
    }
}

#[component]
fn SidebarButton(dashboard: RwSignal<Dashboard>, kind: PanelKind) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=move |_| dashboard.update(|d| d.select(kind))
            class=move || {
                let base = "px-4 py-2 rounded-lg text-left transition-colors";
                if dashboard.with(|d| d.selected()) == Some(kind) {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
        >
            {kind.title()}
        </button>
    }
}
