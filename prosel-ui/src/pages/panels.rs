//! Dashboard Panels
//!
//! The four collection panels. Each binds its add form to the panel draft
//! and supplies the per-record actions; the list itself is shared.

use leptos::*;

use prosel::model::{
    Incident, Patient, Priority, RequestStatus, StatusEnum, Tracking, TrackingStatus,
    TransportRequest,
};
use prosel::panel::{Draft, ListPanel, Resource};

use crate::components::form::{input_class, status_options};
use crate::components::resource_panel::{
    change_status, remove_record, resource_panel, submit_draft, use_list_panel,
};

/// Text input bound to one draft field
fn draft_input<R: Resource>(
    panel: RwSignal<ListPanel<R>>,
    placeholder: &'static str,
    read: fn(&R::Draft) -> String,
    write: fn(&mut R::Draft, String),
) -> View {
    view! {
        <input
            type="text"
            placeholder=placeholder
            prop:value=move || panel.with(|p| read(&p.draft))
            on:input=move |ev| panel.update(|p| write(&mut p.draft, event_target_value(&ev)))
            class=input_class()
        />
    }
    .into_view()
}

/// Status select bound to one draft field
fn draft_select<R: Resource, S: StatusEnum>(
    panel: RwSignal<ListPanel<R>>,
    read: fn(&R::Draft) -> S,
    write: fn(&mut R::Draft, S),
) -> View {
    view! {
        <select
            prop:value=move || panel.with(|p| read(&p.draft).label())
            on:change=move |ev| {
                if let Ok(status) = event_target_value(&ev).parse::<S>() {
                    panel.update(|p| write(&mut p.draft, status));
                }
            }
            class=input_class()
        >
            {status_options(S::ALL)}
        </select>
    }
    .into_view()
}

/// Add form wrapper; the button stays disabled until the draft is ready
fn draft_form<R: Resource>(panel: RwSignal<ListPanel<R>>, inputs: View, submit: &'static str) -> View {
    view! {
        <form
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                submit_draft(panel);
            }
            class="space-y-4"
        >
            {inputs}
            <button
                type="submit"
                disabled=move || !panel.with(|p| p.draft.is_ready())
                class="px-6 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium \
                       disabled:opacity-50 transition-colors"
            >
                {submit}
            </button>
        </form>
    }
    .into_view()
}

fn remove_button<R: prosel::panel::Removable>(panel: RwSignal<ListPanel<R>>, id: String) -> View {
    view! {
        <button
            type="button"
            on:click=move |_| remove_record(panel, id.clone())
            class="px-3 py-1 bg-red-600 hover:bg-red-700 rounded-lg text-sm"
        >
            "Remover"
        </button>
    }
    .into_view()
}

// ============================================
// Gestão de Prioridades
// ============================================

#[component]
pub fn PrioritiesPanel() -> impl IntoView {
    let panel = use_list_panel::<Patient>();

    let inputs = view! {
        {draft_input(panel, "Nome do paciente", |d| d.name.clone(), |d, v| d.name = v)}
        {draft_select::<_, Priority>(panel, |d| d.priority, |d, v| d.priority = v)}
    }
    .into_view();

    resource_panel(
        "Gestão de Prioridades",
        panel,
        draft_form(panel, inputs, "Adicionar Paciente"),
        move |patient: &Patient| {
            let id = patient.id.clone();
            let remove_id = patient.id.clone();
            let current = patient.priority.label();
            view! {
                <select
                    prop:value=current
                    on:change=move |ev| {
                        if let Ok(priority) = event_target_value(&ev).parse::<Priority>() {
                            change_status(panel, id.clone(), priority);
                        }
                    }
                    class="bg-gray-700 rounded-lg px-3 py-1 text-white border border-gray-600"
                >
                    {status_options(Priority::ALL)}
                </select>
                {remove_button(panel, remove_id)}
            }
            .into_view()
        },
    )
}

// ============================================
// Agendamento de Transporte
// ============================================

#[component]
pub fn TransportPanel() -> impl IntoView {
    let panel = use_list_panel::<TransportRequest>();

    let inputs = draft_input(panel, "Nome do paciente", |d| d.patient.clone(), |d, v| d.patient = v);

    resource_panel(
        "Agendamento de Transporte de Pacientes",
        panel,
        draft_form(panel, inputs, "Solicitar Transporte"),
        move |request: &TransportRequest| {
            // Accept/reject only while the request is pending
            request
                .status
                .choices()
                .iter()
                .map(|&target| {
                    let id = request.id.clone();
                    let (label, class) = match target {
                        RequestStatus::Accepted => ("Aceitar", "bg-green-600 hover:bg-green-700"),
                        _ => ("Recusar", "bg-red-600 hover:bg-red-700"),
                    };
                    view! {
                        <button
                            type="button"
                            on:click=move |_| change_status(panel, id.clone(), target)
                            class=format!("px-3 py-1 rounded-lg text-sm {}", class)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()
        },
    )
}

// ============================================
// Rastreamento de Pacientes
// ============================================

#[component]
pub fn TrackingPanel() -> impl IntoView {
    let panel = use_list_panel::<Tracking>();

    let inputs = view! {
        {draft_input(panel, "Nome do paciente", |d| d.name.clone(), |d, v| d.name = v)}
        {draft_select::<_, TrackingStatus>(panel, |d| d.status, |d, v| d.status = v)}
    }
    .into_view();

    resource_panel(
        "Rastreamento de Pacientes",
        panel,
        draft_form(panel, inputs, "Adicionar Rastreamento"),
        move |tracking: &Tracking| {
            let id = tracking.id.clone();
            view! {
                <select
                    prop:value=tracking.status.label()
                    on:change=move |ev| {
                        if let Ok(status) = event_target_value(&ev).parse::<TrackingStatus>() {
                            change_status(panel, id.clone(), status);
                        }
                    }
                    class="bg-gray-700 rounded-lg px-3 py-1 text-white border border-gray-600"
                >
                    {status_options(TrackingStatus::ALL)}
                </select>
            }
            .into_view()
        },
    )
}

// ============================================
// Registro de Incidentes
// ============================================

#[component]
pub fn IncidentsPanel() -> impl IntoView {
    let panel = use_list_panel::<Incident>();

    let inputs = view! {
        {draft_input(panel, "Descrição do incidente", |d| d.description.clone(), |d, v| d.description = v)}
        {draft_input(panel, "Registrado por", |d| d.registered_by.clone(), |d, v| d.registered_by = v)}
    }
    .into_view();

    resource_panel(
        "Registro de Incidentes",
        panel,
        draft_form(panel, inputs, "Registrar Incidente"),
        move |incident: &Incident| remove_button(panel, incident.id.clone()),
    )
}
