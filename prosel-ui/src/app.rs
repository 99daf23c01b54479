//! App Root Component
//!
//! Routing and global providers. Unknown paths land on the sign-in page.

use leptos::*;
use leptos_router::*;

use crate::components::Toast;
use crate::pages::{DashboardPage, SignIn, SignUp};
use crate::state::provide_global_state;

#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white">
                <Routes>
                    <Route path="/signin" view=SignIn />
                    <Route path="/signup" view=SignUp />
                    <Route path="/dashboard" view=DashboardPage />
                    <Route path="/" view=ToSignIn />
                    <Route path="/*any" view=ToSignIn />
                </Routes>

                <Toast />
            </div>
        </Router>
    }
}

#[component]
fn ToSignIn() -> impl IntoView {
    view! { <Redirect path="/signin" /> }
}
