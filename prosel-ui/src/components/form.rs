//! Form Helpers
//!
//! Inputs bound to signals, per-field error text and status option lists.

use leptos::*;

use prosel::auth::{Field, FieldErrors};
use prosel::model::StatusEnum;

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                           border border-gray-600 focus:border-primary-500 focus:outline-none";

/// Text input reading and writing a string signal
#[component]
pub fn TextInput(
    #[prop(default = "text")] kind: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <input
            type=kind
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
            class=INPUT_CLASS
        />
    }
}

/// Message under a field, when validation flagged it
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: Field) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field))
            .map(|message| view! { <span class="text-sm text-red-400">{message}</span> })
    }
}

/// `<option>` per status value, labelled with the wire label
pub fn status_options<S: StatusEnum>(choices: &'static [S]) -> impl IntoView {
    choices
        .iter()
        .map(|s| view! { <option value=s.label()>{s.label()}</option> })
        .collect_view()
}

pub fn input_class() -> &'static str {
    INPUT_CLASS
}
