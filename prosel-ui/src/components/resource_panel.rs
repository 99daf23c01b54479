//! Resource Panel
//!
//! One list view shared by the four dashboard panels. The panel state lives
//! in a signal; each operation runs on a copy, and only the fetched items
//! are merged back once the request and its refetch have finished. Draft
//! and filter edits made meanwhile survive.

use leptos::*;

use prosel::model::StatusEnum;
use prosel::panel::{Filter, ListPanel, Mutation, Removable, Resource, Updatable};

use crate::api::FetchClient;
use crate::state::{expect_state, GlobalState};

/// Create the panel signal and fetch the collection once on mount
pub fn use_list_panel<R: Resource>() -> RwSignal<ListPanel<R>> {
    let panel = create_rw_signal(ListPanel::<R>::new());
    let state = expect_state();

    spawn_local(async move {
        let mut working = panel.get_untracked();
        if let Err(e) = working.load(&FetchClient::from_storage()).await {
            state.show_error("Erro ao carregar dados", &e.to_string());
        }
        panel.update(|p| p.take_items_from(working));
    });

    panel
}

fn settle(state: GlobalState, outcome: Mutation) {
    if let Mutation::Failed(e) = outcome {
        let description = e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| e.to_string());
        state.show_error("Erro na operação", &description);
    }
}

/// Submit the panel's draft
pub fn submit_draft<R: Resource>(panel: RwSignal<ListPanel<R>>) {
    let state = expect_state();
    spawn_local(async move {
        let mut working = panel.get_untracked();
        let submitted = working.draft.clone();
        let outcome = working.add(&FetchClient::from_storage()).await;
        panel.update(|p| {
            p.take_items_from(working);
            p.settle_add(&submitted, &outcome);
        });
        settle(state, outcome);
    });
}

/// Change one record's status (priority for patients)
pub fn change_status<R: Updatable>(panel: RwSignal<ListPanel<R>>, id: String, status: R::Status) {
    let state = expect_state();
    spawn_local(async move {
        let mut working = panel.get_untracked();
        let outcome = working
            .set_status(&FetchClient::from_storage(), &id, status)
            .await;
        panel.update(|p| p.take_items_from(working));
        settle(state, outcome);
    });
}

pub fn remove_record<R: Removable>(panel: RwSignal<ListPanel<R>>, id: String) {
    let state = expect_state();
    spawn_local(async move {
        let mut working = panel.get_untracked();
        let outcome = working.remove(&FetchClient::from_storage(), &id).await;
        panel.update(|p| p.take_items_from(working));
        settle(state, outcome);
    });
}

/// Filter dropdown. Collections without a status get none.
fn filter_select<R: Resource>(panel: RwSignal<ListPanel<R>>) -> View {
    if <R::Status as StatusEnum>::ALL.is_empty() {
        return View::default();
    }

    view! {
        <label class="flex items-center space-x-2 text-sm text-gray-400">
            <span>"Filtrar:"</span>
            <select
                on:change=move |ev| {
                    if let Ok(filter) = event_target_value(&ev).parse::<Filter<R::Status>>() {
                        panel.update(|p| p.apply_filter(filter));
                    }
                }
                prop:value=move || panel.with(|p| p.filter().label())
                class="bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600"
            >
                {Filter::<R::Status>::choices()
                    .into_iter()
                    .map(|f| view! { <option value=f.label()>{f.label()}</option> })
                    .collect_view()}
            </select>
        </label>
    }
    .into_view()
}

/// Title, draft form, filter and the visible records with their actions
pub fn resource_panel<R, A>(
    title: &'static str,
    panel: RwSignal<ListPanel<R>>,
    form: View,
    actions: A,
) -> impl IntoView
where
    R: Resource,
    A: Fn(&R) -> View + 'static,
{
    view! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold">{title}</h2>
            <div class="bg-gray-800 rounded-xl p-6">{form}</div>
            {filter_select(panel)}
            <ul class="space-y-3">
                {move || {
                    panel.with(|p| {
                        let visible = p.visible();
                        if visible.is_empty() {
                            return view! {
                                <li class="text-gray-400">"Nenhum registro encontrado."</li>
                            }
                            .into_view();
                        }

                        visible
                            .into_iter()
                            .map(|item| {
                                let fields = item
                                    .fields()
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <p>
                                            <strong>{label}": "</strong>
                                            {value}
                                        </p>
                                    })
                                    .collect_view();
                                view! {
                                    <li class="bg-gray-800 rounded-lg p-4 flex justify-between items-center">
                                        <div>{fields}</div>
                                        <div class="flex space-x-2">{actions(item)}</div>
                                    </li>
                                }
                            })
                            .collect_view()
                    })
                }}
            </ul>
        </section>
    }
}
