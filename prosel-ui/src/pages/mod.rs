//! Pages
//!
//! Top-level page components for each route.

use leptos_router::NavigateOptions;

use prosel::auth::{FieldErrors, Submission};

use crate::state::GlobalState;

pub mod dashboard;
pub mod panels;
pub mod signin;
pub mod signup;

pub use dashboard::DashboardPage;
pub use signin::SignIn;
pub use signup::SignUp;

/// Act on a finished submit: toast plus navigation, or the field errors
/// to render when nothing was sent.
pub(crate) fn follow<N>(state: GlobalState, navigate: &N, submission: Submission) -> FieldErrors
where
    N: Fn(&str, NavigateOptions),
{
    match submission {
        Submission::Invalid(errors) => errors,
        Submission::Done {
            notification,
            navigate: route,
        } => {
            state.show(notification);
            if let Some(route) = route {
                navigate(route.path(), NavigateOptions::default());
            }
            FieldErrors::default()
        }
    }
}
