//! Sign-In Page

use leptos::*;
use leptos_router::*;

use prosel::auth::{authenticate, Field, FieldErrors, SignInForm};

use crate::api::{self, FetchClient};
use crate::components::form::{FieldError, TextInput};
use crate::state::expect_state;

use super::follow;

#[component]
pub fn SignIn() -> impl IntoView {
    let state = expect_state();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = SignInForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();

        set_submitting.set(true);
        spawn_local(async move {
            // The session is only touched after the request has settled
            let submission = match authenticate(&form, &FetchClient::from_storage()).await {
                Ok(user) => state.login(user),
                Err(submission) => submission,
            };
            errors.set(follow(state, &navigate, submission));
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 space-y-6">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">"Hospital Geral Cleriston Andrade"</h1>
                    <p class="text-gray-400 mt-1">"Prosel"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <div class="space-y-1">
                        <TextInput kind="email" placeholder="Email" value=email />
                        <FieldError errors=errors field=Field::Email />
                    </div>
                    <div class="space-y-1">
                        <TextInput kind="password" placeholder="Senha" value=password />
                        <FieldError errors=errors field=Field::Password />
                    </div>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium \
                               disabled:opacity-50 transition-colors"
                    >
                        {move || if submitting.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>

                <p class="text-center text-sm text-gray-400">
                    "Não tem uma conta? "
                    <A href="/signup" class="text-primary-400 hover:underline">"Cadastre-se"</A>
                </p>

                <ServerSettings />
            </div>
        </div>
    }
}

/// API base URL, kept in localStorage
#[component]
fn ServerSettings() -> impl IntoView {
    let state = expect_state();
    let url = create_rw_signal(api::get_api_base());

    let save = move |_| {
        let value = url.get_untracked();
        api::set_api_base(&value);
        state.show(prosel::auth::Notification::info("Servidor atualizado", value));
    };

    view! {
        <details class="text-sm text-gray-400">
            <summary class="cursor-pointer">"Servidor"</summary>
            <div class="mt-2 flex space-x-2">
                <TextInput placeholder="http://localhost:3001/api/" value=url />
                <button
                    type="button"
                    on:click=save
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                >
                    "Salvar"
                </button>
            </div>
        </details>
    }
}
