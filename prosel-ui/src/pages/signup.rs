//! Sign-Up Page

use leptos::*;
use leptos_router::*;

use prosel::auth::{submit_sign_up, Field, FieldErrors, SignUpForm};

use crate::api::FetchClient;
use crate::components::form::{FieldError, TextInput};
use crate::state::expect_state;

use super::follow;

#[component]
pub fn SignUp() -> impl IntoView {
    let state = expect_state();
    let navigate = use_navigate();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = SignUpForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let navigate = navigate.clone();

        set_submitting.set(true);
        spawn_local(async move {
            let submission = submit_sign_up(&form, &FetchClient::from_storage()).await;
            errors.set(follow(state, &navigate, submission));
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 space-y-6">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">"Hospital Geral Cleriston Andrade"</h1>
                    <p class="text-gray-400 mt-1">"Criar conta"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <div class="space-y-1">
                        <TextInput placeholder="Nome" value=name />
                        <FieldError errors=errors field=Field::Name />
                    </div>
                    <div class="space-y-1">
                        <TextInput kind="email" placeholder="Email" value=email />
                        <FieldError errors=errors field=Field::Email />
                    </div>
                    <div class="space-y-1">
                        <TextInput kind="password" placeholder="Senha" value=password />
                        <FieldError errors=errors field=Field::Password />
                    </div>
                    <div class="space-y-1">
                        <TextInput kind="password" placeholder="Confirmar senha" value=confirm_password />
                        <FieldError errors=errors field=Field::ConfirmPassword />
                    </div>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium \
                               disabled:opacity-50 transition-colors"
                    >
                        {move || if submitting.get() { "Cadastrando..." } else { "Cadastrar" }}
                    </button>
                </form>

                <p class="text-center text-sm text-gray-400">
                    "Já tem uma conta? "
                    <A href="/signin" class="text-primary-400 hover:underline">"Entrar"</A>
                </p>
            </div>
        </div>
    }
}
