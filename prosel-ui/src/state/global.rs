//! Global Application State
//!
//! The session is created once here and only changed through
//! [`GlobalState::login`] and [`GlobalState::logout`]. Views read the
//! `profile` signal, which mirrors it.

use leptos::*;

use prosel::auth::{complete_sign_in, sign_out, Notification, Submission};
use prosel::model::User;
use prosel::session::{Profile, Session};

use super::storage::LocalStorageStore;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// The one persisted user record
    pub session: StoredValue<Session<LocalStorageStore>>,
    /// Signed-in user, `None` when signed out
    pub profile: RwSignal<Option<Profile>>,
    /// Toast currently on screen
    pub toast: RwSignal<Option<ShownToast>>,
    /// Id handed to the next toast
    next_toast: StoredValue<u64>,
}

/// A notification on screen, tagged so its timer only clears itself
#[derive(Debug, Clone, PartialEq)]
pub struct ShownToast {
    pub id: u64,
    pub notification: Notification,
}

impl ShownToast {
    /// Clear `current` if it is still the toast `id`
    fn expire(current: &mut Option<ShownToast>, id: u64) {
        if current.as_ref().map(|shown| shown.id) == Some(id) {
            *current = None;
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let session = Session::open(LocalStorageStore);
    let profile = session.user().map(Profile::from);

    provide_context(GlobalState {
        session: store_value(session),
        profile: create_rw_signal(profile),
        toast: create_rw_signal(None),
        next_toast: store_value(0),
    });
}

pub fn expect_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Persist an authenticated user
    pub fn login(&self, user: User) -> Submission {
        let submission = self
            .session
            .try_update_value(|session| complete_sign_in(session, user))
            .unwrap_or_else(|| Submission::Done {
                notification: Notification::error("Erro no login", "Ocorreu um erro ao fazer login."),
                navigate: None,
            });
        self.sync_profile();
        submission
    }

    /// Forget the user locally
    pub fn logout(&self) -> Submission {
        let submission = self
            .session
            .try_update_value(sign_out)
            .unwrap_or_else(|| Submission::Done {
                notification: Notification::success("Logout bem-sucedido", "Você saiu com sucesso."),
                navigate: Some(prosel::shell::Route::SignIn),
            });
        self.sync_profile();
        submission
    }

    fn sync_profile(&self) {
        let profile = self
            .session
            .with_value(|session| session.user().map(Profile::from));
        self.profile.set(profile);
    }

    /// Show a toast (auto-clears after its duration)
    pub fn show(&self, notification: Notification) {
        let duration = notification.duration_ms;
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id.wrapping_add(1));
        self.toast.set(Some(ShownToast { id, notification }));

        let toast = self.toast;
        gloo_timers::callback::Timeout::new(duration, move || {
            toast.update(|current| ShownToast::expire(current, id));
        })
        .forget();
    }

    /// Show an error toast and log it to the console
    pub fn show_error(&self, title: &str, description: &str) {
        web_sys::console::error_1(&format!("{}: {}", title, description).into());
        self.show(Notification::error(title, description));
    }

    pub fn clear_toast(&self) {
        self.toast.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn shown(id: u64) -> Option<ShownToast> {
        Some(ShownToast {
            id,
            notification: Notification::error("Erro na operação", "Registro não encontrado"),
        })
    }

    #[wasm_bindgen_test]
    fn test_identical_toast_outlives_earlier_timer() {
        // Same text shown twice; the first timer must not clear the second
        let mut current = shown(2);
        ShownToast::expire(&mut current, 1);
        assert_eq!(current, shown(2));

        ShownToast::expire(&mut current, 2);
        assert_eq!(current, None);
    }
}
