//! Dashboard Page
//!
//! Protected shell: header with the greeting, sidebar, and the selected panel.

use leptos::*;
use leptos_router::*;

use prosel::shell::{Dashboard, PanelKind, Route, NO_PANEL_HINT};

use crate::components::Sidebar;
use crate::state::expect_state;

use super::follow;
use super::panels::{IncidentsPanel, PrioritiesPanel, TrackingPanel, TransportPanel};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_state();

    move || match state.profile.get() {
        Some(profile) => view! { <Shell name=profile.name /> }.into_view(),
        None => view! { <Redirect path=Route::SignIn.path() /> }.into_view(),
    }
}

#[component]
fn Shell(name: String) -> impl IntoView {
    let state = expect_state();
    let navigate = use_navigate();
    let dashboard = create_rw_signal(Dashboard::new());

    let on_logout = move |_: ()| {
        let submission = state.logout();
        follow(state, &navigate, submission);
    };

    view! {
        <div class="flex min-h-screen">
            <Sidebar dashboard=dashboard on_logout=on_logout />
            <div class="flex-1 flex flex-col">
                <header class="bg-gray-800 border-b border-gray-700 px-8 py-4 flex justify-between">
                    <h1 class="text-xl font-bold">"Hospital Geral Cleriston Andrade"</h1>
                    <span class="text-gray-300">{Dashboard::greeting(&name)}</span>
                </header>
                <main class="flex-1 p-8">
                    {move || match dashboard.with(|d| d.selected()) {
                        None => view! { <p class="text-gray-400">{NO_PANEL_HINT}</p> }.into_view(),
                        Some(kind) => panel_view(kind),
                    }}
                </main>
            </div>
        </div>
    }
}

fn panel_view(kind: PanelKind) -> View {
    match kind {
        PanelKind::Transport => view! { <TransportPanel /> }.into_view(),
        PanelKind::Tracking => view! { <TrackingPanel /> }.into_view(),
        PanelKind::Priorities => view! { <PrioritiesPanel /> }.into_view(),
        PanelKind::Incidents => view! { <IncidentsPanel /> }.into_view(),
    }
}
